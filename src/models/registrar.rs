//! Registrar and allowance models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::leave::{LeaveRecord, RawLeaveRecord, RecordWarning, parse_leave_records};

/// A registrar's yearly leave entitlement, in days.
///
/// Missing fields deserialize as zero.
///
/// # Example
///
/// ```
/// use rota_engine::models::Allowance;
/// use rust_decimal::Decimal;
///
/// let allowance: Allowance = serde_json::from_str(r#"{"annual": 25}"#).unwrap();
/// assert_eq!(allowance.annual, Decimal::from(25));
/// assert_eq!(allowance.study, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// Study leave days per cycle.
    #[serde(default)]
    pub study: Decimal,
    /// Annual leave days per cycle.
    #[serde(default)]
    pub annual: Decimal,
}

/// A registrar as described in the registrar data file.
///
/// The allowance is normally an `allowance` object. Older data files spread
/// it across `statutory_leave`, `carried_over_leave`, `days_off_in_lieu`
/// (which together make up annual leave) and `study_leave`; those are still
/// accepted and used when no `allowance` object is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registrar {
    /// The registrar's display name, also used as their identifier.
    pub name: String,
    /// Explicit allowance, if the data file provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance: Option<Allowance>,
    /// Legacy statutory annual leave days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statutory_leave: Option<Decimal>,
    /// Legacy annual leave days carried over from the previous cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carried_over_leave: Option<Decimal>,
    /// Legacy days off in lieu, added to annual leave.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_off_in_lieu: Option<Decimal>,
    /// Legacy study leave days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_leave: Option<Decimal>,
    /// Leave records as written in the data file.
    #[serde(default)]
    pub leave_records: Vec<RawLeaveRecord>,
}

impl Registrar {
    /// Creates a registrar with an explicit allowance and no leave.
    pub fn new(name: impl Into<String>, allowance: Allowance) -> Self {
        Self {
            name: name.into(),
            allowance: Some(allowance),
            statutory_leave: None,
            carried_over_leave: None,
            days_off_in_lieu: None,
            study_leave: None,
            leave_records: Vec::new(),
        }
    }

    /// Resolves the registrar's allowance.
    ///
    /// An explicit `allowance` object wins; otherwise annual leave is the sum
    /// of the legacy annual fields and study leave is `study_leave`. Any
    /// missing figure counts as zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rota_engine::models::Registrar;
    /// use rust_decimal::Decimal;
    ///
    /// let json = r#"{
    ///     "name": "Dr Ben Okafor",
    ///     "statutory_leave": 27,
    ///     "carried_over_leave": 3,
    ///     "days_off_in_lieu": 2,
    ///     "study_leave": 30,
    ///     "leave_records": []
    /// }"#;
    /// let registrar: Registrar = serde_json::from_str(json).unwrap();
    /// assert_eq!(registrar.allowance().annual, Decimal::from(32));
    /// assert_eq!(registrar.allowance().study, Decimal::from(30));
    /// ```
    pub fn allowance(&self) -> Allowance {
        if let Some(allowance) = self.allowance {
            return allowance;
        }

        let annual = [
            self.statutory_leave,
            self.carried_over_leave,
            self.days_off_in_lieu,
        ]
        .iter()
        .flatten()
        .sum();

        Allowance {
            study: self.study_leave.unwrap_or(Decimal::ZERO),
            annual,
        }
    }

    /// Parses this registrar's leave records, with a warning per unreadable record.
    pub fn parse_leave(&self) -> (Vec<LeaveRecord>, Vec<RecordWarning>) {
        parse_leave_records(&self.leave_records)
    }

    /// Parses this registrar's leave records, dropping any that cannot be read.
    pub fn leave(&self) -> Vec<LeaveRecord> {
        self.parse_leave().0
    }

    /// Adds a leave record, returning the registrar for chaining.
    pub fn with_leave(mut self, record: RawLeaveRecord) -> Self {
        self.leave_records.push(record);
        self
    }
}
