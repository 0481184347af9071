//! The weekly rota view.
//!
//! A [`RotaWeek`] is seven days starting on a Monday, each carrying its rota
//! assignments and who is on leave. Navigation is bounded: the earliest week
//! is the one holding the first rota day, and the latest is a navigation
//! window past the week holding the last rota day.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::availability::who_on_leave;
use super::calendar::week_start;
use crate::models::{DayShifts, Registrar, Rota};

/// Default navigation window past the last rota week, in days.
pub const DEFAULT_WINDOW_DAYS: u64 = 14;

/// The range of weeks the rota view can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaBounds {
    /// Monday of the week holding the first rota day.
    pub first_week: NaiveDate,
    /// Monday of the week holding the last rota day, plus the window.
    pub last_week: NaiveDate,
}

/// Computes navigation bounds for `rota`, or `None` when it is empty.
pub fn rota_bounds(rota: &Rota, window_days: u64) -> Option<RotaBounds> {
    let first = rota.first_date()?;
    let last = rota.last_date()?;
    let last_week = week_start(last).checked_add_days(Days::new(window_days))?;

    Some(RotaBounds {
        first_week: week_start(first),
        last_week,
    })
}

/// One day of the weekly view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaWeekDay {
    /// The date.
    pub date: NaiveDate,
    /// Day of the week.
    pub weekday: Weekday,
    /// Rota assignments; empty when the rota has no entry for the day.
    pub shifts: DayShifts,
    /// Registrars on leave that day.
    pub on_leave: Vec<String>,
    /// Whether this is today.
    pub is_today: bool,
}

/// Seven days of rota starting on a Monday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaWeek {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Sunday of the week.
    pub week_end: NaiveDate,
    /// The seven days, Monday first.
    pub days: Vec<RotaWeekDay>,
    /// Whether an earlier week can be shown.
    pub can_go_back: bool,
    /// Whether a later week can be shown.
    pub can_go_forward: bool,
}

/// Builds the week containing `date`.
///
/// Without bounds (an empty rota) neither navigation direction is allowed.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::{build_rota_week, rota_bounds};
/// use rota_engine::models::{Rota, RotaEntry};
/// use chrono::NaiveDate;
///
/// let entries: Vec<RotaEntry> = serde_json::from_str(
///     r#"[{"Date": "13/01/2025", "Shifts": {"AM": {"Duty": ["Dr A"]}}}]"#,
/// ).unwrap();
/// let rota = Rota::from_entries(entries).unwrap();
/// let bounds = rota_bounds(&rota, 14);
///
/// let wednesday = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let week = build_rota_week(&rota, &[], wednesday, wednesday, bounds, 14);
///
/// assert_eq!(week.week_start, NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
/// assert_eq!(week.days.len(), 7);
/// assert_eq!(week.days[0].shifts.am.duty, vec!["Dr A"]);
/// assert!(week.days[2].is_today);
/// assert!(!week.can_go_back);
/// assert!(week.can_go_forward);
/// ```
pub fn build_rota_week(
    rota: &Rota,
    registrars: &[Registrar],
    date: NaiveDate,
    today: NaiveDate,
    bounds: Option<RotaBounds>,
    window_days: u64,
) -> RotaWeek {
    let start = week_start(date);

    let days: Vec<RotaWeekDay> = start
        .iter_days()
        .take(7)
        .map(|day| RotaWeekDay {
            date: day,
            weekday: day.weekday(),
            shifts: rota
                .day(day)
                .map(|rota_day| rota_day.shifts.clone())
                .unwrap_or_default(),
            on_leave: who_on_leave(registrars, day),
            is_today: day == today,
        })
        .collect();

    let week_end = days.last().map_or(start, |day| day.date);

    let (can_go_back, can_go_forward) = match bounds {
        Some(bounds) => (
            start > bounds.first_week,
            start
                .checked_add_days(Days::new(window_days))
                .is_some_and(|next| next <= bounds.last_week),
        ),
        None => (false, false),
    };

    RotaWeek {
        week_start: start,
        week_end,
        days,
        can_go_back,
        can_go_forward,
    }
}
