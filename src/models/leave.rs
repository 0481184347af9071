//! Leave record models.
//!
//! Leave is stored on disk as [`RawLeaveRecord`]s with textual dates and a
//! free-text type. They are converted into [`LeaveRecord`]s, which carry
//! parsed dates and a closed [`LeaveType`], before any calculation runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_record_date;
use crate::error::EngineError;

/// The category of a leave record, which decides how its days are counted.
///
/// # Example
///
/// ```
/// use rota_engine::models::LeaveType;
///
/// assert_eq!(LeaveType::from_label("Annual"), LeaveType::Annual);
/// assert_eq!(LeaveType::from_label("study"), LeaveType::Study);
/// assert_eq!(LeaveType::from_label("Exam"), LeaveType::Other);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual leave, counted in working days.
    Annual,
    /// Study leave, counted in calendar days.
    Study,
    /// Any other free-text leave type, counted in calendar days.
    Other,
}

impl LeaveType {
    /// Maps a free-text leave label to a [`LeaveType`].
    ///
    /// "Annual" and "Study" are matched ignoring case and surrounding
    /// whitespace; every other label is [`LeaveType::Other`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("annual") {
            LeaveType::Annual
        } else if label.eq_ignore_ascii_case("study") {
            LeaveType::Study
        } else {
            LeaveType::Other
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Annual => write!(f, "Annual"),
            LeaveType::Study => write!(f, "Study"),
            LeaveType::Other => write!(f, "Other"),
        }
    }
}

/// A leave record as written in the registrar data file.
///
/// Dates are "D Month YYYY" text, e.g. `"16 Sep 2024"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLeaveRecord {
    /// First day of leave, inclusive.
    pub start: String,
    /// Last day of leave, inclusive.
    pub end: String,
    /// Free-text leave type ("Annual", "Study", ...).
    #[serde(rename = "type")]
    pub leave_type: String,
    /// Whether the record is a half day.
    #[serde(default, alias = "halfDay")]
    pub half_day: bool,
}

/// A parsed, immutable leave record.
///
/// # Example
///
/// ```
/// use rota_engine::models::{LeaveRecord, LeaveType};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let record = LeaveRecord::new(day, day, LeaveType::Annual).with_half_day();
/// assert!(record.half_day);
/// assert!(record.is_single_day());
/// assert!(record.contains(day));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// First day of leave, inclusive.
    pub start: NaiveDate,
    /// Last day of leave, inclusive.
    pub end: NaiveDate,
    /// The counting category.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// The type text as it appeared in the source data, for display.
    pub label: String,
    /// Whether the record is a half day.
    pub half_day: bool,
}

impl LeaveRecord {
    /// Creates a whole-day record labelled with its type name.
    pub fn new(start: NaiveDate, end: NaiveDate, leave_type: LeaveType) -> Self {
        Self {
            start,
            end,
            leave_type,
            label: leave_type.to_string(),
            half_day: false,
        }
    }

    /// Marks the record as a half day.
    pub fn with_half_day(mut self) -> Self {
        self.half_day = true;
        self
    }

    /// Returns true if the record starts and ends on the same day.
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `date` lies within the record (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl TryFrom<&RawLeaveRecord> for LeaveRecord {
    type Error = EngineError;

    fn try_from(raw: &RawLeaveRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            start: parse_record_date(&raw.start)?,
            end: parse_record_date(&raw.end)?,
            leave_type: LeaveType::from_label(&raw.leave_type),
            label: raw.leave_type.trim().to_string(),
            half_day: raw.half_day,
        })
    }
}

/// A warning produced while reading leave records.
///
/// Records that cannot be read are skipped rather than failing the whole
/// report; each skipped record leaves one of these behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordWarning {
    /// A code identifying the kind of problem.
    pub code: String,
    /// A human-readable description.
    pub message: String,
    /// Position of the offending record in the registrar's record list.
    pub record_index: usize,
}

/// Warning code for a leave record whose dates could not be parsed.
pub const INVALID_LEAVE_DATE: &str = "INVALID_LEAVE_DATE";

/// Converts raw records, skipping any that fail to parse.
///
/// Returns the parsed records in source order, plus one [`RecordWarning`]
/// per skipped record.
pub fn parse_leave_records(raw: &[RawLeaveRecord]) -> (Vec<LeaveRecord>, Vec<RecordWarning>) {
    let mut records = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();

    for (index, raw_record) in raw.iter().enumerate() {
        match LeaveRecord::try_from(raw_record) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(record_index = index, error = %err, "Skipping leave record");
                warnings.push(RecordWarning {
                    code: INVALID_LEAVE_DATE.to_string(),
                    message: err.to_string(),
                    record_index: index,
                });
            }
        }
    }

    (records, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(start: &str, end: &str, leave_type: &str) -> RawLeaveRecord {
        RawLeaveRecord {
            start: start.to_string(),
            end: end.to_string(),
            leave_type: leave_type.to_string(),
            half_day: false,
        }
    }

    #[test]
    fn test_leave_type_from_label() {
        assert_eq!(LeaveType::from_label("Annual"), LeaveType::Annual);
        assert_eq!(LeaveType::from_label(" ANNUAL "), LeaveType::Annual);
        assert_eq!(LeaveType::from_label("Study"), LeaveType::Study);
        assert_eq!(LeaveType::from_label("Sick"), LeaveType::Other);
        assert_eq!(LeaveType::from_label(""), LeaveType::Other);
    }

    #[test]
    fn test_deserialize_raw_record_defaults_half_day() {
        let json = r#"{"start": "10 Jan 2024", "end": "12 Jan 2024", "type": "Annual"}"#;
        let record: RawLeaveRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.start, "10 Jan 2024");
        assert_eq!(record.leave_type, "Annual");
        assert!(!record.half_day);
    }

    #[test]
    fn test_deserialize_raw_record_accepts_camel_case_half_day() {
        let json = r#"{"start": "10 Jan 2024", "end": "10 Jan 2024", "type": "Annual", "halfDay": true}"#;
        let record: RawLeaveRecord = serde_json::from_str(json).unwrap();
        assert!(record.half_day);
    }

    #[test]
    fn test_convert_raw_record_keeps_label() {
        let record = LeaveRecord::try_from(&raw("5 Sep 2024", "6 Sep 2024", "Exam")).unwrap();
        assert_eq!(record.start, NaiveDate::from_ymd_opt(2024, 9, 5).unwrap());
        assert_eq!(record.end, NaiveDate::from_ymd_opt(2024, 9, 6).unwrap());
        assert_eq!(record.leave_type, LeaveType::Other);
        assert_eq!(record.label, "Exam");
    }

    #[test]
    fn test_convert_raw_record_with_bad_end_fails() {
        let result = LeaveRecord::try_from(&raw("5 Sep 2024", "6 Spt 2024", "Annual"));
        assert!(matches!(result, Err(EngineError::DateParse { .. })));
    }

    #[test]
    fn test_parse_leave_records_skips_bad_records() {
        let input = vec![
            raw("10 Jan 2024", "10 Jan 2024", "Annual"),
            raw("12 Foo 2024", "13 Jan 2024", "Annual"),
            raw("1 Feb 2024", "2 Feb 2024", "Study"),
        ];

        let (records, warnings) = parse_leave_records(&input);

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].leave_type, LeaveType::Study);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, INVALID_LEAVE_DATE);
        assert_eq!(warnings[0].record_index, 1);
        assert!(warnings[0].message.contains("12 Foo 2024"));
    }

    #[test]
    fn test_reversed_record_is_not_an_error() {
        let record = LeaveRecord::try_from(&raw("10 Jan 2024", "5 Jan 2024", "Annual")).unwrap();
        assert!(record.end < record.start);
        assert!(!record.contains(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
    }

    #[test]
    fn test_serialize_leave_record() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let record = LeaveRecord::new(day, day, LeaveType::Annual);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["start"], "2024-01-10");
        assert_eq!(json["type"], "annual");
        assert_eq!(json["label"], "Annual");
        assert_eq!(json["half_day"], false);
    }
}
