//! Duty rota models.
//!
//! The rota file comes in two shapes. The structured shape has one entry per
//! day with names listed per session and role:
//!
//! ```json
//! { "Date": "13/01/2025", "Shifts": { "AM": { "Duty": ["Dr A"] }, "PM": {} } }
//! ```
//!
//! The older flat shape has one row per session, naming the registrar on
//! duty:
//!
//! ```json
//! { "Date": "18 January 2025", "Shift Type": "Saturday AM", "Registrar": "Dr A" }
//! ```
//!
//! Both are normalized into a [`Rota`] of [`RotaDay`]s. Flat rows land in
//! the Duty role of their session.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_flexible_date;
use crate::error::{EngineError, EngineResult};

/// Half-day session of the rota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Session {
    /// Morning session.
    #[serde(rename = "AM")]
    Am,
    /// Afternoon session.
    #[serde(rename = "PM")]
    Pm,
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Session::Am => write!(f, "AM"),
            Session::Pm => write!(f, "PM"),
        }
    }
}

/// A role a registrar can be rostered to within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// On-call acute unit duty.
    Duty,
    /// Reporting list.
    Reporting,
    /// Ultrasound list.
    Ultrasound,
}

/// Registrars rostered to each role in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionShifts {
    /// Registrars on duty.
    #[serde(rename = "Duty", default)]
    pub duty: Vec<String>,
    /// Registrars on the reporting list.
    #[serde(rename = "Reporting", default)]
    pub reporting: Vec<String>,
    /// Registrars on the ultrasound list.
    #[serde(rename = "Ultrasound", default)]
    pub ultrasound: Vec<String>,
}

impl SessionShifts {
    /// Names rostered to `role`.
    pub fn role(&self, role: Role) -> &[String] {
        match role {
            Role::Duty => &self.duty,
            Role::Reporting => &self.reporting,
            Role::Ultrasound => &self.ultrasound,
        }
    }

    fn role_mut(&mut self, role: Role) -> &mut Vec<String> {
        match role {
            Role::Duty => &mut self.duty,
            Role::Reporting => &mut self.reporting,
            Role::Ultrasound => &mut self.ultrasound,
        }
    }
}

/// Both sessions of a rota day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayShifts {
    /// Morning assignments.
    #[serde(rename = "AM", default)]
    pub am: SessionShifts,
    /// Afternoon assignments.
    #[serde(rename = "PM", default)]
    pub pm: SessionShifts,
}

impl DayShifts {
    /// Assignments for `session`.
    pub fn session(&self, session: Session) -> &SessionShifts {
        match session {
            Session::Am => &self.am,
            Session::Pm => &self.pm,
        }
    }

    fn session_mut(&mut self, session: Session) -> &mut SessionShifts {
        match session {
            Session::Am => &mut self.am,
            Session::Pm => &mut self.pm,
        }
    }

    /// Returns true if `name` is rostered to `role` in `session`.
    pub fn is_rostered(&self, session: Session, role: Role, name: &str) -> bool {
        self.session(session)
            .role(role)
            .iter()
            .any(|rostered| rostered == name)
    }
}

/// One day of the rota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// Session and role assignments for the day.
    pub shifts: DayShifts,
}

/// A rota file entry in the structured shape.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredRotaEntry {
    /// Date text, normally "dd/mm/yyyy".
    #[serde(rename = "Date")]
    pub date: String,
    /// Session and role assignments.
    #[serde(rename = "Shifts", default)]
    pub shifts: DayShifts,
}

/// A rota file entry in the flat, one-row-per-session shape.
#[derive(Debug, Clone, Deserialize)]
pub struct FlatRotaEntry {
    /// Date text, normally "D Month YYYY".
    #[serde(rename = "Date")]
    pub date: String,
    /// Weekday and session, e.g. "Saturday AM".
    #[serde(rename = "Shift Type")]
    pub shift_type: String,
    /// The registrar on duty.
    #[serde(rename = "Registrar")]
    pub registrar: String,
}

/// Either rota file shape.
///
/// The flat shape is tried first because its required fields never appear in
/// structured entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RotaEntry {
    /// One row per session.
    Flat(FlatRotaEntry),
    /// One entry per day.
    Structured(StructuredRotaEntry),
}

/// Picks the session out of a flat row's shift type ("Saturday AM").
fn session_from_shift_type(shift_type: &str) -> Option<Session> {
    let upper = shift_type.to_ascii_uppercase();
    if upper.split_whitespace().any(|word| word == "AM") {
        Some(Session::Am)
    } else if upper.split_whitespace().any(|word| word == "PM") {
        Some(Session::Pm)
    } else {
        None
    }
}

/// A normalized rota, ordered by date with at most one [`RotaDay`] per date.
///
/// # Example
///
/// ```
/// use rota_engine::models::{Rota, RotaEntry, Role, Session};
/// use chrono::NaiveDate;
///
/// let entries: Vec<RotaEntry> = serde_json::from_str(r#"[
///     {"Date": "18 January 2025", "Shift Type": "Saturday AM", "Registrar": "Dr A"},
///     {"Date": "13/01/2025", "Shifts": {"PM": {"Duty": ["Dr B"]}}}
/// ]"#).unwrap();
///
/// let rota = Rota::from_entries(entries).unwrap();
/// assert_eq!(rota.days().len(), 2);
/// assert_eq!(rota.first_date(), NaiveDate::from_ymd_opt(2025, 1, 13));
///
/// let saturday = rota.day(NaiveDate::from_ymd_opt(2025, 1, 18).unwrap()).unwrap();
/// assert!(saturday.shifts.is_rostered(Session::Am, Role::Duty, "Dr A"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rota {
    days: Vec<RotaDay>,
}

impl Rota {
    /// Normalizes rota file entries.
    ///
    /// Entries for the same date are merged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRotaEntry`] when an entry's date cannot
    /// be parsed or a flat row's shift type names no session.
    pub fn from_entries(entries: Vec<RotaEntry>) -> EngineResult<Self> {
        let mut by_date: BTreeMap<NaiveDate, DayShifts> = BTreeMap::new();

        for (index, entry) in entries.into_iter().enumerate() {
            let invalid = |message: String| EngineError::InvalidRotaEntry { index, message };

            match entry {
                RotaEntry::Structured(entry) => {
                    let date =
                        parse_flexible_date(&entry.date).map_err(|e| invalid(e.to_string()))?;
                    let day = by_date.entry(date).or_default();
                    for session in [Session::Am, Session::Pm] {
                        for role in [Role::Duty, Role::Reporting, Role::Ultrasound] {
                            day.session_mut(session)
                                .role_mut(role)
                                .extend(entry.shifts.session(session).role(role).iter().cloned());
                        }
                    }
                }
                RotaEntry::Flat(entry) => {
                    let date =
                        parse_flexible_date(&entry.date).map_err(|e| invalid(e.to_string()))?;
                    let session = session_from_shift_type(&entry.shift_type).ok_or_else(|| {
                        invalid(format!("no session in shift type '{}'", entry.shift_type))
                    })?;
                    by_date
                        .entry(date)
                        .or_default()
                        .session_mut(session)
                        .duty
                        .push(entry.registrar);
                }
            }
        }

        Ok(Self {
            days: by_date
                .into_iter()
                .map(|(date, shifts)| RotaDay { date, shifts })
                .collect(),
        })
    }

    /// All rota days in date order.
    pub fn days(&self) -> &[RotaDay] {
        &self.days
    }

    /// Returns true if the rota has no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The rota day for `date`, if the rota covers it.
    pub fn day(&self, date: NaiveDate) -> Option<&RotaDay> {
        self.days
            .binary_search_by_key(&date, |day| day.date)
            .ok()
            .map(|index| &self.days[index])
    }

    /// The earliest date in the rota.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|day| day.date)
    }

    /// The latest date in the rota.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|day| day.date)
    }
}
