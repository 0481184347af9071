//! What each registrar is doing in each session of a day.
//!
//! Precedence, highest first:
//!
//! 1. Leave covers both sessions.
//! 2. Duty in the rota for the session is acute unit on-call.
//! 3. On a weekday, the training block covering the date.
//! 4. Otherwise the session is free.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::availability::is_on_leave;
use super::blocks::block_for_date;
use super::calendar::is_weekend;
use crate::error::EngineResult;
use crate::models::{Registrar, RegistrarBlocks, Role, Rota, Session};

/// A registrar's activity in one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "block")]
pub enum Activity {
    /// On leave.
    Leave,
    /// On call in the acute unit.
    OnCall,
    /// Working in the named training block.
    Block(String),
    /// Nothing scheduled.
    Free,
}

impl Activity {
    /// The text shown in the schedule cell.
    pub fn label(&self) -> String {
        match self {
            Activity::Leave => "Leave".to_string(),
            Activity::OnCall => "AAU".to_string(),
            Activity::Block(name) => format!("{} block", name),
            Activity::Free => String::new(),
        }
    }
}

/// One registrar's row of the daily schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarActivity {
    /// The registrar's name.
    pub registrar: String,
    /// Morning activity.
    pub am: Activity,
    /// Afternoon activity.
    pub pm: Activity,
}

/// Every registrar's activities for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    /// The date.
    pub date: NaiveDate,
    /// Day of the week.
    pub weekday: Weekday,
    /// One row per registrar, in registrar order.
    pub entries: Vec<RegistrarActivity>,
}

fn session_activity(
    registrar: &str,
    session: Session,
    rota: &Rota,
    block: Option<&str>,
    date: NaiveDate,
) -> Activity {
    let on_duty = rota
        .day(date)
        .is_some_and(|day| day.shifts.is_rostered(session, Role::Duty, registrar));

    if on_duty {
        Activity::OnCall
    } else if let Some(name) = block {
        Activity::Block(name.to_string())
    } else {
        Activity::Free
    }
}

/// Builds the schedule for `date`.
///
/// `blocks` maps registrar names to their placements; registrars missing
/// from it have no block.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::DateParse`] if a placement has an
/// unknown month name.
pub fn build_daily_schedule(
    registrars: &[Registrar],
    rota: &Rota,
    blocks: &BTreeMap<String, RegistrarBlocks>,
    date: NaiveDate,
) -> EngineResult<DailySchedule> {
    let mut entries = Vec::with_capacity(registrars.len());

    for registrar in registrars {
        let name = registrar.name.as_str();

        if is_on_leave(&registrar.leave(), date) {
            entries.push(RegistrarActivity {
                registrar: name.to_string(),
                am: Activity::Leave,
                pm: Activity::Leave,
            });
            continue;
        }

        let block = match blocks.get(name) {
            Some(placements) if !is_weekend(date) => {
                block_for_date(&placements.blocks, date)?.map(|b| b.block_name.as_str())
            }
            _ => None,
        };

        entries.push(RegistrarActivity {
            registrar: name.to_string(),
            am: session_activity(name, Session::Am, rota, block, date),
            pm: session_activity(name, Session::Pm, rota, block, date),
        });
    }

    Ok(DailySchedule {
        date,
        weekday: date.weekday(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allowance, BlockPlacement, RawLeaveRecord, RotaEntry};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn placement(name: &str, start_month: &str, start_year: i32, end_month: &str, end_year: i32) -> BlockPlacement {
        BlockPlacement {
            block_name: name.to_string(),
            start_month: start_month.to_string(),
            start_year,
            end_month: end_month.to_string(),
            end_year,
        }
    }

    fn create_test_registrars() -> Vec<Registrar> {
        vec![
            Registrar::new("Dr Alice Morgan", Allowance::default()),
            Registrar::new("Dr Ben Okafor", Allowance::default()).with_leave(RawLeaveRecord {
                start: "13 Jan 2025".to_string(),
                end: "17 Jan 2025".to_string(),
                leave_type: "Annual".to_string(),
                half_day: false,
            }),
            Registrar::new("Dr Chloe Reyes", Allowance::default()),
        ]
    }

    fn create_test_rota() -> Rota {
        let entries: Vec<RotaEntry> = serde_json::from_str(
            r#"[
                {"Date": "13/01/2025", "Shifts": {
                    "AM": {"Duty": ["Dr Chloe Reyes"], "Reporting": ["Dr Alice Morgan"]},
                    "PM": {"Duty": ["Dr Alice Morgan", "Dr Ben Okafor"]}
                }},
                {"Date": "18/01/2025", "Shifts": {
                    "AM": {"Duty": ["Dr Chloe Reyes"]},
                    "PM": {"Duty": ["Dr Chloe Reyes"]}
                }}
            ]"#,
        )
        .unwrap();
        Rota::from_entries(entries).unwrap()
    }

    fn create_test_blocks() -> BTreeMap<String, RegistrarBlocks> {
        let mut blocks = BTreeMap::new();
        blocks.insert(
            "Dr Alice Morgan".to_string(),
            RegistrarBlocks {
                blocks: vec![
                    placement("Neuro", "February", 2025, "April", 2025),
                    placement("MSK", "Nov", 2024, "Jan", 2025),
                ],
            },
        );
        blocks.insert(
            "Dr Chloe Reyes".to_string(),
            RegistrarBlocks {
                blocks: vec![placement("Chest", "Jan", 2025, "Mar", 2025)],
            },
        );
        blocks
    }

    fn activities(schedule: &DailySchedule, name: &str) -> (Activity, Activity) {
        let entry = schedule
            .entries
            .iter()
            .find(|entry| entry.registrar == name)
            .unwrap();
        (entry.am.clone(), entry.pm.clone())
    }

    // ==========================================================================
    // DS-001: precedence
    // ==========================================================================
    #[test]
    fn test_ds_001_weekday_precedence() {
        let schedule = build_daily_schedule(
            &create_test_registrars(),
            &create_test_rota(),
            &create_test_blocks(),
            make_date("2025-01-13"),
        )
        .unwrap();

        assert_eq!(schedule.weekday, Weekday::Mon);
        assert_eq!(
            activities(&schedule, "Dr Alice Morgan"),
            (Activity::Block("MSK".to_string()), Activity::OnCall)
        );
        assert_eq!(
            activities(&schedule, "Dr Chloe Reyes"),
            (Activity::OnCall, Activity::Block("Chest".to_string()))
        );
    }

    #[test]
    fn test_ds_002_leave_beats_duty() {
        let schedule = build_daily_schedule(
            &create_test_registrars(),
            &create_test_rota(),
            &create_test_blocks(),
            make_date("2025-01-13"),
        )
        .unwrap();

        assert_eq!(
            activities(&schedule, "Dr Ben Okafor"),
            (Activity::Leave, Activity::Leave)
        );
    }

    #[test]
    fn test_ds_003_weekend_has_no_blocks() {
        let schedule = build_daily_schedule(
            &create_test_registrars(),
            &create_test_rota(),
            &create_test_blocks(),
            make_date("2025-01-18"),
        )
        .unwrap();

        assert_eq!(
            activities(&schedule, "Dr Alice Morgan"),
            (Activity::Free, Activity::Free)
        );
        assert_eq!(
            activities(&schedule, "Dr Chloe Reyes"),
            (Activity::OnCall, Activity::OnCall)
        );
        assert_eq!(
            activities(&schedule, "Dr Ben Okafor"),
            (Activity::Free, Activity::Free)
        );
    }

    #[test]
    fn test_ds_004_entries_follow_registrar_order() {
        let schedule = build_daily_schedule(
            &create_test_registrars(),
            &Rota::default(),
            &BTreeMap::new(),
            make_date("2025-01-14"),
        )
        .unwrap();
        let names: Vec<&str> = schedule.entries.iter().map(|e| e.registrar.as_str()).collect();
        assert_eq!(names, vec!["Dr Alice Morgan", "Dr Ben Okafor", "Dr Chloe Reyes"]);
        assert_eq!(schedule.entries[0].am, Activity::Free);
    }

    #[test]
    fn test_ds_005_labels() {
        assert_eq!(Activity::Leave.label(), "Leave");
        assert_eq!(Activity::OnCall.label(), "AAU");
        assert_eq!(Activity::Block("Neuro".to_string()).label(), "Neuro block");
        assert_eq!(Activity::Free.label(), "");
    }

    #[test]
    fn test_ds_006_activity_serialization() {
        let json = serde_json::to_value(Activity::Block("MSK".to_string())).unwrap();
        assert_eq!(json["kind"], "Block");
        assert_eq!(json["block"], "MSK");
        let json = serde_json::to_value(Activity::OnCall).unwrap();
        assert_eq!(json["kind"], "OnCall");
    }
}
