//! Calculation logic for the rota engine.
//!
//! This module contains the calendar helpers, the leave cycle resolver,
//! apportionment of leave records across cycles, per-cycle summaries and
//! leave reports, and the rota views built on top of them: who is on leave,
//! the weekly rota, block lookup and the daily schedule.

mod apportionment;
mod availability;
mod blocks;
mod calendar;
mod cycle_summary;
mod daily_schedule;
mod leave_cycle;
mod leave_report;
mod rota_week;

pub use apportionment::{ApportionedLeave, CountingRule, apportion, apportion_leave, standalone_days};
pub use availability::{is_on_leave, who_on_leave};
pub use blocks::{block_for_date, sorted_blocks};
pub use calendar::{
    DateFormat, MAX_YEAR, MIN_YEAR, calendar_days_between, format_record_date, is_weekend, month_from_name, parse_date,
    parse_flexible_date, parse_record_date, parse_slash_date, week_start, weekdays_between,
};
pub use cycle_summary::{CycleGroup, LeaveSummary, group_by_cycle, summarize, summarize_records};
pub use daily_schedule::{Activity, DailySchedule, RegistrarActivity, build_daily_schedule};
pub use leave_cycle::{CYCLE_START_MONTH, LeaveCycle, cycle_for_date, cycle_for_year};
pub use leave_report::{
    CycleReport, ENGINE_VERSION, LeaveReport, build_cycle_report, build_leave_report,
};
pub use rota_week::{
    DEFAULT_WINDOW_DAYS, RotaBounds, RotaWeek, RotaWeekDay, build_rota_week, rota_bounds,
};
