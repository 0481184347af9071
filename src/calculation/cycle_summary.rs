//! Grouping apportioned leave by cycle and summarizing usage.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::apportionment::{ApportionedLeave, apportion_leave};
use super::leave_cycle::{LeaveCycle, cycle_for_date};
use crate::error::EngineResult;
use crate::models::{Allowance, LeaveRecord, LeaveType};

/// The leave records that touch one cycle, each apportioned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleGroup {
    /// The cycle.
    pub cycle: LeaveCycle,
    /// Apportioned records, in the order they were first seen.
    pub records: Vec<ApportionedLeave>,
}

impl CycleGroup {
    /// Creates an empty group for `cycle`.
    pub fn new(cycle: LeaveCycle) -> Self {
        Self {
            cycle,
            records: Vec::new(),
        }
    }

    /// Returns true if a record with the same start and end is already grouped.
    fn has_dates_of(&self, record: &LeaveRecord) -> bool {
        self.records
            .iter()
            .any(|existing| existing.record.start == record.start && existing.record.end == record.end)
    }
}

/// Groups leave records by the cycles they touch.
///
/// Each record is walked from its start to its end; every cycle it reaches
/// gets one [`ApportionedLeave`] entry carrying that cycle's share. Records
/// are de-duplicated per cycle on their (start, end) dates, so a second
/// record with exactly the same dates is ignored. A record ending before it
/// starts touches no cycle.
///
/// The map is keyed by cycle label, which sorts chronologically.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::DateParse`] if a record reaches a
/// date no cycle can be built for (see [`cycle_for_date`]).
///
/// # Example
///
/// ```
/// use rota_engine::calculation::group_by_cycle;
/// use rota_engine::models::{LeaveRecord, LeaveType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = LeaveRecord::new(
///     NaiveDate::from_ymd_opt(2024, 7, 29).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 8, 9).unwrap(),
///     LeaveType::Annual,
/// );
/// let groups = group_by_cycle(&[record]).unwrap();
///
/// assert_eq!(groups.len(), 2);
/// let days: Vec<Decimal> = groups
///     .values()
///     .map(|group| group.records[0].days_in_cycle)
///     .collect();
/// assert_eq!(days, vec![Decimal::from(7), Decimal::from(3)]);
/// ```
pub fn group_by_cycle(records: &[LeaveRecord]) -> EngineResult<BTreeMap<String, CycleGroup>> {
    let mut groups: BTreeMap<String, CycleGroup> = BTreeMap::new();

    for record in records {
        let mut day = record.start;
        while day <= record.end {
            let cycle = cycle_for_date(day)?;
            let next_day = cycle.end.succ_opt();

            let group = groups
                .entry(cycle.label.clone())
                .or_insert_with(|| CycleGroup::new(cycle));
            if !group.has_dates_of(record) {
                let apportioned = apportion_leave(record, &group.cycle);
                group.records.push(apportioned);
            }

            // Every remaining day up to the cycle end resolves to the same cycle.
            match next_day {
                Some(next) => day = next,
                None => break,
            }
        }
    }

    Ok(groups)
}

/// Leave used and remaining within one cycle.
///
/// Remaining figures are not floored at zero; a negative value means the
/// allowance has been overspent. They are normalized, so "27.0" minus 3
/// reads "24" and no remaining figure is ever "-0".
///
/// # Example
///
/// ```
/// use rota_engine::calculation::LeaveSummary;
/// use rota_engine::models::Allowance;
/// use rust_decimal::Decimal;
///
/// let allowance = Allowance { annual: Decimal::from(27), study: Decimal::from(5) };
/// let summary = LeaveSummary::from_usage(Decimal::ZERO, Decimal::from(3), Decimal::ZERO, &allowance);
/// assert_eq!(summary.annual_remaining, Decimal::from(24));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSummary {
    /// Study leave days used.
    pub study_used: Decimal,
    /// Annual leave days used.
    pub annual_used: Decimal,
    /// Other leave days used.
    pub other_used: Decimal,
    /// Study allowance minus study used.
    pub study_remaining: Decimal,
    /// Annual allowance minus annual used.
    pub annual_remaining: Decimal,
    /// Other leave has no allowance, so this is the negated usage.
    pub other_remaining: Decimal,
}

impl LeaveSummary {
    /// Builds a summary from per-type usage and an allowance.
    pub fn from_usage(
        study_used: Decimal,
        annual_used: Decimal,
        other_used: Decimal,
        allowance: &Allowance,
    ) -> Self {
        Self {
            study_used,
            annual_used,
            other_used,
            study_remaining: (allowance.study - study_used).normalize(),
            annual_remaining: (allowance.annual - annual_used).normalize(),
            other_remaining: (-other_used).normalize(),
        }
    }
}

/// Sums apportioned days per leave type and compares them with an allowance.
pub fn summarize_records(records: &[ApportionedLeave], allowance: &Allowance) -> LeaveSummary {
    let mut study = Decimal::ZERO;
    let mut annual = Decimal::ZERO;
    let mut other = Decimal::ZERO;

    for apportioned in records {
        match apportioned.record.leave_type {
            LeaveType::Study => study += apportioned.days_in_cycle,
            LeaveType::Annual => annual += apportioned.days_in_cycle,
            LeaveType::Other => other += apportioned.days_in_cycle,
        }
    }

    LeaveSummary::from_usage(study, annual, other, allowance)
}

/// Summarizes one cycle group against an allowance.
pub fn summarize(group: &CycleGroup, allowance: &Allowance) -> LeaveSummary {
    summarize_records(&group.records, allowance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(start: &str, end: &str, leave_type: LeaveType) -> LeaveRecord {
        LeaveRecord::new(make_date(start), make_date(end), leave_type)
    }

    fn allowance(annual: &str, study: &str) -> Allowance {
        Allowance {
            annual: dec(annual),
            study: dec(study),
        }
    }

    // ==========================================================================
    // CG-001: grouping
    // ==========================================================================
    #[test]
    fn test_cg_001_records_in_one_cycle_share_a_group() {
        let records = vec![
            record("2024-01-10", "2024-01-10", LeaveType::Annual),
            record("2023-12-30", "2024-01-02", LeaveType::Study),
        ];
        let groups = group_by_cycle(&records).unwrap();

        assert_eq!(groups.len(), 1);
        let group = groups.get("2023-08-02/2024-08-06").unwrap();
        assert_eq!(group.records.len(), 2);
        assert_eq!(group.records[0].days_in_cycle, dec("1"));
        assert_eq!(group.records[1].days_in_cycle, dec("4"));
    }

    #[test]
    fn test_cg_002_record_spanning_four_cycles() {
        let records = vec![record("2023-06-01", "2025-09-01", LeaveType::Other)];
        let groups = group_by_cycle(&records).unwrap();

        assert_eq!(groups.len(), 4);
        let total: Decimal = groups
            .values()
            .map(|group| group.records[0].days_in_cycle)
            .sum();
        assert_eq!(
            total,
            Decimal::from((make_date("2025-09-01") - make_date("2023-06-01")).num_days() + 1)
        );
    }

    #[test]
    fn test_cg_003_identical_dates_are_deduplicated() {
        let records = vec![
            record("2024-01-10", "2024-01-12", LeaveType::Annual),
            record("2024-01-10", "2024-01-12", LeaveType::Study),
        ];
        let groups = group_by_cycle(&records).unwrap();
        let group = groups.values().next().unwrap();
        assert_eq!(group.records.len(), 1);
        assert_eq!(group.records[0].record.leave_type, LeaveType::Annual);
    }

    #[test]
    fn test_cg_004_reversed_record_touches_no_cycle() {
        let records = vec![record("2024-01-12", "2024-01-10", LeaveType::Annual)];
        assert!(group_by_cycle(&records).unwrap().is_empty());
    }

    #[test]
    fn test_cg_005_keys_sort_chronologically() {
        let records = vec![
            record("2025-01-10", "2025-01-10", LeaveType::Annual),
            record("2023-01-10", "2023-01-10", LeaveType::Annual),
            record("2024-01-10", "2024-01-10", LeaveType::Annual),
        ];
        let groups = group_by_cycle(&records).unwrap();
        let starts: Vec<NaiveDate> = groups.values().map(|g| g.cycle.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_cg_006_grouping_is_idempotent() {
        let records = vec![
            record("2024-07-29", "2024-08-09", LeaveType::Annual),
            record("2024-03-14", "2024-03-14", LeaveType::Annual).with_half_day(),
        ];
        assert_eq!(group_by_cycle(&records).unwrap(), group_by_cycle(&records).unwrap());
    }

    // ==========================================================================
    // CG-010: summaries
    // ==========================================================================
    #[test]
    fn test_cg_010_summary_sums_per_type() {
        let records = vec![
            record("2024-01-10", "2024-01-10", LeaveType::Annual),
            record("2024-01-15", "2024-01-16", LeaveType::Annual),
            record("2023-12-30", "2024-01-02", LeaveType::Study),
            record("2024-03-14", "2024-03-14", LeaveType::Annual).with_half_day(),
            record("2024-02-03", "2024-02-04", LeaveType::Other),
        ];
        let groups = group_by_cycle(&records).unwrap();
        let group = groups.values().next().unwrap();
        let summary = summarize(group, &allowance("27", "5"));

        assert_eq!(summary.annual_used, dec("3.5"));
        assert_eq!(summary.study_used, dec("4"));
        assert_eq!(summary.other_used, dec("2"));
        assert_eq!(summary.annual_remaining, dec("23.5"));
        assert_eq!(summary.study_remaining, dec("1"));
        assert_eq!(summary.other_remaining, dec("-2"));
    }

    #[test]
    fn test_cg_011_annual_remaining_example() {
        let summary = LeaveSummary::from_usage(
            Decimal::ZERO,
            dec("3"),
            Decimal::ZERO,
            &allowance("27", "5"),
        );
        assert_eq!(summary.annual_remaining, dec("24"));
        assert_eq!(summary.study_remaining, dec("5"));
    }

    #[test]
    fn test_cg_012_remaining_can_go_negative() {
        let records = vec![record("2024-01-01", "2024-01-31", LeaveType::Study)];
        let groups = group_by_cycle(&records).unwrap();
        let summary = summarize(groups.values().next().unwrap(), &allowance("27", "5"));
        assert_eq!(summary.study_used, dec("31"));
        assert_eq!(summary.study_remaining, dec("-26"));
    }

    #[test]
    fn test_cg_013_empty_group_leaves_full_allowance() {
        let group = CycleGroup::new(cycle_for_date(make_date("2024-01-15")).unwrap());
        let summary = summarize(&group, &allowance("27", "5"));
        assert_eq!(summary.annual_used, Decimal::ZERO);
        assert_eq!(summary.annual_remaining, dec("27"));
        assert_eq!(summary.other_remaining, Decimal::ZERO);
    }

    #[test]
    fn test_cg_014_remaining_figures_are_normalized() {
        let summary = LeaveSummary::from_usage(
            dec("5.0"),
            dec("3"),
            Decimal::ZERO,
            &allowance("27.0", "5.0"),
        );
        assert_eq!(summary.annual_remaining.to_string(), "24");
        assert_eq!(summary.study_remaining.to_string(), "0");
        assert_eq!(summary.other_remaining.to_string(), "0");

        let summary = LeaveSummary::from_usage(
            dec("0.5"),
            Decimal::ZERO,
            dec("1.50"),
            &allowance("27.00", "5.00"),
        );
        assert_eq!(summary.annual_remaining.to_string(), "27");
        assert_eq!(summary.study_remaining.to_string(), "4.5");
        assert_eq!(summary.other_remaining.to_string(), "-1.5");
    }

    #[test]
    fn test_cg_015_record_beyond_calendar_limits_is_an_error() {
        let end = NaiveDate::MAX;
        let start = end.pred_opt().unwrap();
        let records = vec![LeaveRecord::new(start, end, LeaveType::Annual)];
        assert!(matches!(
            group_by_cycle(&records),
            Err(crate::error::EngineError::DateParse { .. })
        ));
    }
}
