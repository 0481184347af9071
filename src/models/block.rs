//! Training block models.
//!
//! Two files describe blocks. The registrar blocks file places each
//! registrar in named blocks spanning whole months. The block timetable file
//! lists, for each block, what happens in each weekday session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::month_from_name;
use crate::error::{EngineError, EngineResult};

/// A registrar's placement in a training block.
///
/// The placement covers the first day of the start month through the last
/// day of the end month.
///
/// # Example
///
/// ```
/// use rota_engine::models::BlockPlacement;
/// use chrono::NaiveDate;
///
/// let placement = BlockPlacement {
///     block_name: "MSK".to_string(),
///     start_month: "Nov".to_string(),
///     start_year: 2024,
///     end_month: "January".to_string(),
///     end_year: 2025,
/// };
/// let (start, end) = placement.date_range().unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPlacement {
    /// The block's name, e.g. "Neuro".
    pub block_name: String,
    /// Month the placement starts, abbreviated or in full.
    pub start_month: String,
    /// Year the placement starts.
    pub start_year: i32,
    /// Month the placement ends, abbreviated or in full.
    pub end_month: String,
    /// Year the placement ends.
    pub end_year: i32,
}

fn parse_month(name: &str) -> EngineResult<u32> {
    month_from_name(name).ok_or_else(|| EngineError::DateParse {
        input: name.to_string(),
        message: format!("unrecognized month '{}'", name),
    })
}

fn first_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::DateParse {
        input: format!("{}-{:02}", year, month),
        message: "month out of range".to_string(),
    })
}

impl BlockPlacement {
    /// First day of the start month.
    pub fn start_date(&self) -> EngineResult<NaiveDate> {
        first_of_month(self.start_year, parse_month(&self.start_month)?)
    }

    /// Last day of the end month.
    pub fn end_date(&self) -> EngineResult<NaiveDate> {
        let month = parse_month(&self.end_month)?;
        let (next_year, next_month) = if month == 12 {
            let next_year = self.end_year.checked_add(1).ok_or_else(|| EngineError::DateParse {
                input: format!("{} {}", self.end_month, self.end_year),
                message: "year out of range".to_string(),
            })?;
            (next_year, 1)
        } else {
            (self.end_year, month + 1)
        };
        let next = first_of_month(next_year, next_month)?;
        next.pred_opt().ok_or_else(|| EngineError::DateParse {
            input: self.end_month.clone(),
            message: "month out of range".to_string(),
        })
    }

    /// The inclusive date range the placement covers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DateParse`] if either month name is unknown.
    pub fn date_range(&self) -> EngineResult<(NaiveDate, NaiveDate)> {
        Ok((self.start_date()?, self.end_date()?))
    }

    /// Returns true if `date` falls within the placement.
    pub fn covers(&self, date: NaiveDate) -> EngineResult<bool> {
        let (start, end) = self.date_range()?;
        Ok(date >= start && date <= end)
    }
}

/// All block placements for one registrar, as stored in the registrar blocks file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarBlocks {
    /// The registrar's placements, in file order.
    #[serde(rename = "Blocks", default)]
    pub blocks: Vec<BlockPlacement>,
}

/// What happens in one session of a block timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSlot {
    /// The activity, e.g. "CT Head".
    pub value: String,
    /// Whether the session can be released for acute unit duty.
    #[serde(default)]
    pub aau_friendly: bool,
}

/// One weekday row of a block timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableDay {
    /// The weekday name as written in the file.
    pub day: String,
    /// Morning session.
    pub am: SessionSlot,
    /// Afternoon session.
    pub pm: SessionSlot,
}

#[derive(Debug, Deserialize)]
struct DaySlots {
    #[serde(rename = "AM", default)]
    am: SessionSlot,
    #[serde(rename = "PM", default)]
    pm: SessionSlot,
}

/// The weekly timetable of one training block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTimetable {
    /// The block's name.
    pub name: String,
    /// Weekday rows in file order.
    pub days: Vec<TimetableDay>,
}

/// Parses the block timetable file, keeping blocks and weekdays in file order.
///
/// The file maps block names to weekday names to `AM`/`PM` slots.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if the file does not have
/// that shape.
///
/// # Example
///
/// ```
/// use rota_engine::models::parse_block_timetables;
///
/// let value = serde_json::json!({
///     "Neuro": {
///         "Monday": {"AM": {"value": "CT Head", "aau_friendly": true}, "PM": {"value": "MRI"}}
///     }
/// });
/// let timetables = parse_block_timetables(value).unwrap();
/// assert_eq!(timetables[0].name, "Neuro");
/// assert!(timetables[0].days[0].am.aau_friendly);
/// assert!(!timetables[0].days[0].pm.aau_friendly);
/// ```
pub fn parse_block_timetables(
    value: serde_json::Value,
) -> Result<Vec<BlockTimetable>, serde_json::Error> {
    let blocks: serde_json::Map<String, serde_json::Value> = serde_json::from_value(value)?;

    blocks
        .into_iter()
        .map(|(name, days)| -> Result<BlockTimetable, serde_json::Error> {
            let days: serde_json::Map<String, serde_json::Value> = serde_json::from_value(days)?;
            let days = days
                .into_iter()
                .map(|(day, slots)| -> Result<TimetableDay, serde_json::Error> {
                    let slots: DaySlots = serde_json::from_value(slots)?;
                    Ok(TimetableDay {
                        day,
                        am: slots.am,
                        pm: slots.pm,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(BlockTimetable { name, days })
        })
        .collect()
}
