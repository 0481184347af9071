//! Annual leave cycle resolution.
//!
//! A leave cycle opens on the first Wednesday of August and closes on the
//! Tuesday before the next cycle opens, which is the first Tuesday of the
//! following August in every year except those where 1 August falls on a
//! Wednesday. Cycles are contiguous and never overlap, so every date belongs
//! to exactly one of them.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::calendar::{first_weekday_on_or_after, format_record_date};
use crate::error::{EngineError, EngineResult};

/// The month (1-based) in which every leave cycle begins.
pub const CYCLE_START_MONTH: u32 = 8;

/// A one-year leave-accounting window.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::cycle_for_date;
/// use chrono::NaiveDate;
///
/// let cycle = cycle_for_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()).unwrap();
/// assert_eq!(cycle.start, NaiveDate::from_ymd_opt(2023, 8, 2).unwrap());
/// assert_eq!(cycle.end, NaiveDate::from_ymd_opt(2024, 8, 6).unwrap());
/// assert_eq!(cycle.label, "2023-08-02/2024-08-06");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaveCycle {
    /// First day of the cycle (a Wednesday).
    pub start: NaiveDate,
    /// Last day of the cycle, inclusive (a Tuesday).
    pub end: NaiveDate,
    /// Stable grouping key built from the ISO start and end dates.
    pub label: String,
}

impl LeaveCycle {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            label: format!("{}/{}", start, end),
        }
    }

    /// Returns true if `date` falls inside this cycle (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Human-readable form of the cycle, e.g. "2 Aug 2023 to 6 Aug 2024".
    pub fn display_label(&self) -> String {
        format!(
            "{} to {}",
            format_record_date(self.start),
            format_record_date(self.end)
        )
    }

    /// The calendar year in which this cycle starts.
    pub fn start_year(&self) -> i32 {
        self.start.year()
    }
}

/// 1 August of `year`, or an error when chrono cannot represent it.
fn august_first(year: i32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, CYCLE_START_MONTH, 1)
        .ok_or_else(|| out_of_range(&format!("year {}", year)))
}

fn out_of_range(input: &str) -> EngineError {
    EngineError::date_parse(input, "no leave cycle can be built this close to the calendar limits")
}

/// First Wednesday on or after 1 August of `year`.
fn cycle_start(year: i32) -> EngineResult<NaiveDate> {
    Ok(first_weekday_on_or_after(august_first(year)?, Weekday::Wed))
}

/// Builds the cycle that starts in August of `year`.
///
/// The closing Tuesday is searched for from 1 August of the following year.
/// When that Tuesday would reach into the next cycle (1 August is a
/// Wednesday), the cycle closes the day before the next one opens.
///
/// # Errors
///
/// Returns [`EngineError::DateParse`] when the cycle or its successor would
/// fall outside the range of [`NaiveDate`].
pub fn cycle_for_year(year: i32) -> EngineResult<LeaveCycle> {
    let next_year = year
        .checked_add(1)
        .ok_or_else(|| out_of_range(&format!("year {}", year)))?;
    let start = cycle_start(year)?;
    let next_start = cycle_start(next_year)?;

    let closing_tuesday = first_weekday_on_or_after(august_first(next_year)?, Weekday::Tue);

    let end = if closing_tuesday >= next_start {
        next_start
            .pred_opt()
            .ok_or_else(|| out_of_range(&next_start.to_string()))?
    } else {
        closing_tuesday
    };

    Ok(LeaveCycle::new(start, end))
}

/// Resolves the leave cycle containing `date`.
///
/// Dates before August belong to the cycle that started the previous year.
/// Early-August dates that precede that year's first Wednesday still belong
/// to the previous cycle.
///
/// # Errors
///
/// Returns [`EngineError::DateParse`] for dates within about a year of
/// [`NaiveDate::MIN`] or [`NaiveDate::MAX`]. Every date the crate's parsers
/// accept resolves.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::cycle_for_date;
/// use chrono::NaiveDate;
///
/// // 1 Aug 2024 is a Thursday: the 2024 cycle only opens on Wednesday 7 Aug
/// let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// let cycle = cycle_for_date(date).unwrap();
/// assert_eq!(cycle.start, NaiveDate::from_ymd_opt(2023, 8, 2).unwrap());
/// assert!(cycle.contains(date));
/// ```
pub fn cycle_for_date(date: NaiveDate) -> EngineResult<LeaveCycle> {
    let year = if date.month() < CYCLE_START_MONTH {
        date.year() - 1
    } else {
        date.year()
    };

    let cycle = cycle_for_year(year).map_err(|_| out_of_range(&date.to_string()))?;
    if date < cycle.start {
        cycle_for_year(year - 1).map_err(|_| out_of_range(&date.to_string()))
    } else {
        Ok(cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    // ==========================================================================
    // LC-001: mid-cycle winter date
    // ==========================================================================
    #[test]
    fn test_lc_001_january_date_uses_previous_august() {
        let cycle = cycle_for_date(make_date("2024-01-15")).unwrap();
        assert_eq!(cycle.start, make_date("2023-08-02"));
        assert_eq!(cycle.end, make_date("2024-08-06"));
        assert_eq!(cycle.start.weekday(), Weekday::Wed);
        assert_eq!(cycle.end.weekday(), Weekday::Tue);
    }

    // ==========================================================================
    // LC-002: boundary days
    // ==========================================================================
    #[test]
    fn test_lc_002_cycle_start_belongs_to_new_cycle() {
        let cycle = cycle_for_date(make_date("2024-08-07")).unwrap();
        assert_eq!(cycle.start, make_date("2024-08-07"));
        assert_eq!(cycle.end, make_date("2025-08-05"));
    }

    #[test]
    fn test_lc_003_cycle_end_belongs_to_old_cycle() {
        let cycle = cycle_for_date(make_date("2024-08-06")).unwrap();
        assert_eq!(cycle.start, make_date("2023-08-02"));
    }

    #[test]
    fn test_lc_004_early_august_before_first_wednesday() {
        // 2024-08-01 (Thu) through 2024-08-06 (Tue) precede the 2024 cycle start
        for day in 1..=6 {
            let date = NaiveDate::from_ymd_opt(2024, 8, day).unwrap();
            let cycle = cycle_for_date(date).unwrap();
            assert!(cycle.contains(date), "{} not in {}", date, cycle.label);
            assert_eq!(cycle.start, make_date("2023-08-02"));
        }
    }

    // ==========================================================================
    // LC-005: 1 August on a Wednesday
    // ==========================================================================
    #[test]
    fn test_lc_005_wednesday_first_of_august_closes_previous_cycle_early() {
        // 2029-08-01 is a Wednesday
        assert_eq!(make_date("2029-08-01").weekday(), Weekday::Wed);

        let previous = cycle_for_year(2028).unwrap();
        assert_eq!(previous.end, make_date("2029-07-31"));
        assert_eq!(previous.end.weekday(), Weekday::Tue);

        let current = cycle_for_date(make_date("2029-08-03")).unwrap();
        assert_eq!(current.start, make_date("2029-08-01"));
    }

    #[test]
    fn test_lc_006_consecutive_cycles_are_contiguous() {
        for year in 2000..2060 {
            let cycle = cycle_for_year(year).unwrap();
            let next = cycle_for_year(year + 1).unwrap();
            assert_eq!(cycle.end.succ_opt().unwrap(), next.start, "year {}", year);
        }
    }

    #[test]
    fn test_lc_007_leap_year_cycle() {
        // Cycle starting 2023 spans 29 Feb 2024
        let cycle = cycle_for_date(make_date("2024-02-29")).unwrap();
        assert_eq!(cycle.label, "2023-08-02/2024-08-06");
    }

    #[test]
    fn test_lc_008_cycle_of_start_is_same_cycle() {
        let cycle = cycle_for_date(make_date("2025-03-10")).unwrap();
        assert_eq!(cycle_for_date(cycle.start).unwrap(), cycle);
        assert_eq!(cycle_for_date(cycle.end).unwrap(), cycle);
    }

    #[test]
    fn test_lc_009_display_label() {
        let cycle = cycle_for_date(make_date("2024-01-15")).unwrap();
        assert_eq!(cycle.display_label(), "2 Aug 2023 to 6 Aug 2024");
        assert_eq!(cycle.start_year(), 2023);
    }

    // ==========================================================================
    // LC-010: calendar limits
    // ==========================================================================
    #[test]
    fn test_lc_010_dates_near_chrono_limits_are_errors() {
        for date in [NaiveDate::MIN, NaiveDate::MAX] {
            match cycle_for_date(date) {
                Err(EngineError::DateParse { input, .. }) => assert_eq!(input, date.to_string()),
                other => panic!("Expected DateParse for {}, got {:?}", date, other),
            }
        }
        assert!(cycle_for_year(i32::MAX).is_err());
        assert!(cycle_for_year(NaiveDate::MAX.year()).is_err());
    }

    #[test]
    fn test_lc_011_parseable_extremes_resolve() {
        use crate::calculation::calendar::parse_record_date;

        for text in ["1 Jan 1", "31 Dec 9999"] {
            let date = parse_record_date(text).unwrap();
            let cycle = cycle_for_date(date).unwrap();
            assert!(cycle.contains(date), "{} not in {}", text, cycle.label);
        }
    }
}
