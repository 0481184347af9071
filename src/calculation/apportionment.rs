//! Leave apportionment across leave cycles.
//!
//! This module works out how much of a leave record falls inside a given
//! [`LeaveCycle`]. Annual leave is counted in working days; study and other
//! leave in calendar days. Half-day records count 0.5 and only when they
//! cover a single day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calendar::{calendar_days_between, weekdays_between};
use super::leave_cycle::LeaveCycle;
use crate::models::{LeaveRecord, LeaveType};

/// The counting rule that produced an apportioned figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingRule {
    /// Monday–Friday days only (annual leave).
    Weekdays,
    /// Every calendar day (study and other leave).
    CalendarDays,
    /// A single-day half-day record, worth 0.5.
    HalfDay,
    /// A half-day flag on a multi-day record, which counts nothing.
    InvalidHalfDay,
    /// The record does not overlap the cycle.
    NoOverlap,
}

/// A leave record together with the days it uses in one cycle.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::{apportion_leave, cycle_for_date, CountingRule};
/// use rota_engine::models::{LeaveRecord, LeaveType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let record = LeaveRecord::new(day, day, LeaveType::Annual);
/// let apportioned = apportion_leave(&record, &cycle_for_date(day).unwrap());
///
/// assert_eq!(apportioned.days_in_cycle, Decimal::ONE);
/// assert_eq!(apportioned.rule, CountingRule::Weekdays);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApportionedLeave {
    /// The source record, unclipped.
    pub record: LeaveRecord,
    /// Label of the cycle this portion belongs to.
    pub cycle_label: String,
    /// Days used inside the cycle, in steps of 0.5.
    pub days_in_cycle: Decimal,
    /// The rule used to count them.
    pub rule: CountingRule,
}

/// Value of a half-day record.
fn half_day() -> Decimal {
    Decimal::new(5, 1)
}

/// Clips the record's range to the cycle, or `None` when they do not overlap.
fn clip(record: &LeaveRecord, cycle: &LeaveCycle) -> Option<(NaiveDate, NaiveDate)> {
    let start = record.start.max(cycle.start);
    let end = record.end.min(cycle.end);
    (start <= end).then_some((start, end))
}

/// Counts the days in `[start, end]` under the record's rule.
fn count(record: &LeaveRecord, start: NaiveDate, end: NaiveDate) -> (Decimal, CountingRule) {
    if record.half_day {
        return if record.is_single_day() {
            (half_day(), CountingRule::HalfDay)
        } else {
            (Decimal::ZERO, CountingRule::InvalidHalfDay)
        };
    }

    match record.leave_type {
        LeaveType::Annual => (
            Decimal::from(weekdays_between(start, end)),
            CountingRule::Weekdays,
        ),
        LeaveType::Study | LeaveType::Other => (
            Decimal::from(calendar_days_between(start, end)),
            CountingRule::CalendarDays,
        ),
    }
}

/// Apportions `record` to `cycle`, keeping the counting rule used.
pub fn apportion_leave(record: &LeaveRecord, cycle: &LeaveCycle) -> ApportionedLeave {
    let (days_in_cycle, rule) = match clip(record, cycle) {
        Some((start, end)) => count(record, start, end),
        None => (Decimal::ZERO, CountingRule::NoOverlap),
    };

    ApportionedLeave {
        record: record.clone(),
        cycle_label: cycle.label.clone(),
        days_in_cycle,
        rule,
    }
}

/// Returns the days of `record` that fall inside `cycle`.
///
/// - No overlap: 0.
/// - Half day: 0.5 if the record is a single day inside the cycle, else 0.
/// - Annual: weekdays in the overlap.
/// - Study and other: calendar days in the overlap.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::{apportion, cycle_for_date};
/// use rota_engine::models::{LeaveRecord, LeaveType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // Saturday 30 Dec 2023 to Tuesday 2 Jan 2024
/// let record = LeaveRecord::new(
///     NaiveDate::from_ymd_opt(2023, 12, 30).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     LeaveType::Study,
/// );
/// let cycle = cycle_for_date(record.start).unwrap();
/// assert_eq!(apportion(&record, &cycle), Decimal::from(4));
/// ```
pub fn apportion(record: &LeaveRecord, cycle: &LeaveCycle) -> Decimal {
    apportion_leave(record, cycle).days_in_cycle
}

/// Counts the whole record under its rule, ignoring cycles.
///
/// For any record this equals the sum of [`apportion`] over every cycle it
/// touches.
pub fn standalone_days(record: &LeaveRecord) -> Decimal {
    if record.end < record.start {
        return Decimal::ZERO;
    }
    count(record, record.start, record.end).0
}
