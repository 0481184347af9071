//! Per-registrar leave reports.
//!
//! A [`LeaveReport`] is everything the leave page shows for one registrar:
//! each cycle their leave touches, the apportioned records in it, per-cycle
//! usage against the allowance, and any records that had to be skipped.

use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::apportionment::ApportionedLeave;
use super::cycle_summary::{CycleGroup, LeaveSummary, group_by_cycle, summarize, summarize_records};
use super::leave_cycle::{LeaveCycle, cycle_for_date};
use crate::error::EngineResult;
use crate::models::{Allowance, RecordWarning, Registrar};

/// Version string stamped on every report.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One cycle of a leave report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// The cycle.
    pub cycle: LeaveCycle,
    /// Human-readable cycle label, e.g. "2 Aug 2023 to 6 Aug 2024".
    pub display_label: String,
    /// Apportioned records ordered by start date.
    pub records: Vec<ApportionedLeave>,
    /// Usage and remaining allowance for the cycle.
    pub summary: LeaveSummary,
}

impl CycleReport {
    /// Builds the report for one cycle group.
    pub fn from_group(group: CycleGroup, allowance: &Allowance) -> Self {
        let summary = summarize(&group, allowance);
        let mut records = group.records;
        records.sort_by_key(|apportioned| apportioned.record.start);

        Self {
            display_label: group.cycle.display_label(),
            cycle: group.cycle,
            records,
            summary,
        }
    }
}

/// The complete leave report for a registrar.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::build_leave_report;
/// use rota_engine::models::{Allowance, RawLeaveRecord, Registrar};
/// use rust_decimal::Decimal;
///
/// let registrar = Registrar::new(
///     "Dr Alice Morgan",
///     Allowance { annual: Decimal::from(27), study: Decimal::from(5) },
/// )
/// .with_leave(RawLeaveRecord {
///     start: "10 Jan 2024".to_string(),
///     end: "12 Jan 2024".to_string(),
///     leave_type: "Annual".to_string(),
///     half_day: false,
/// });
///
/// let report = build_leave_report(&registrar).unwrap();
/// assert_eq!(report.cycles.len(), 1);
/// assert_eq!(report.cycles[0].summary.annual_used, Decimal::from(3));
/// assert_eq!(report.cycles[0].summary.annual_remaining, Decimal::from(24));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced it.
    pub engine_version: String,
    /// The registrar's name.
    pub registrar: String,
    /// The allowance every cycle is measured against.
    pub allowance: Allowance,
    /// Cycles in chronological order.
    pub cycles: Vec<CycleReport>,
    /// Usage summed across every cycle.
    ///
    /// The `*_used` figures are all-time totals. The `*_remaining` figures
    /// are the single-cycle allowance minus that all-time usage, so once
    /// leave spans more than one cycle they are not a balance; use each
    /// cycle's own summary for that.
    pub totals: LeaveSummary,
    /// Records that could not be read.
    pub warnings: Vec<RecordWarning>,
    /// Time taken to build the report, in microseconds.
    pub duration_us: u64,
}

impl LeaveReport {
    /// The cycle report containing `date`, if the registrar has leave in it.
    pub fn cycle_containing(&self, date: NaiveDate) -> Option<&CycleReport> {
        self.cycles.iter().find(|report| report.cycle.contains(date))
    }
}

/// Builds the leave report for `registrar`.
///
/// Records with unreadable dates are skipped and reported as warnings; the
/// rest are grouped by cycle and summarized against the registrar's
/// allowance.
///
/// # Errors
///
/// Propagates the error from [`group_by_cycle`] when a record lies too close
/// to the calendar limits to be placed in a cycle.
pub fn build_leave_report(registrar: &Registrar) -> EngineResult<LeaveReport> {
    let started = Instant::now();
    let allowance = registrar.allowance();
    let (records, warnings) = registrar.parse_leave();

    let cycles: Vec<CycleReport> = group_by_cycle(&records)?
        .into_values()
        .map(|group| CycleReport::from_group(group, &allowance))
        .collect();

    let all_records: Vec<ApportionedLeave> = cycles
        .iter()
        .flat_map(|report| report.records.iter().cloned())
        .collect();
    let totals = summarize_records(&all_records, &allowance);

    tracing::debug!(
        registrar = %registrar.name,
        records = records.len(),
        cycles = cycles.len(),
        warnings = warnings.len(),
        "Built leave report"
    );

    Ok(LeaveReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        registrar: registrar.name.clone(),
        allowance,
        cycles,
        totals,
        warnings,
        duration_us: started.elapsed().as_micros() as u64,
    })
}

/// Builds the report for the single cycle containing `date`.
///
/// A cycle with no leave still gets a report, with nothing used and the full
/// allowance remaining.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::DateParse`] when `date` is too close
/// to the calendar limits to have a cycle.
pub fn build_cycle_report(registrar: &Registrar, date: NaiveDate) -> EngineResult<CycleReport> {
    let allowance = registrar.allowance();
    let cycle = cycle_for_date(date)?;

    let group = group_by_cycle(&registrar.leave())?
        .remove(&cycle.label)
        .unwrap_or_else(|| CycleGroup::new(cycle));

    Ok(CycleReport::from_group(group, &allowance))
}
