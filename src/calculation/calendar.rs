//! Calendar utilities shared by the leave and rota calculations.
//!
//! This module provides weekday counting, inclusive day counting, Monday week
//! starts, and the date format adapters used at the data-loading boundary.
//! Every format collapses to a single [`NaiveDate`] representation.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Month names accepted by the textual date formats, as (abbreviation, full name).
const MONTH_NAMES: [(&str, &str); 12] = [
    ("jan", "january"),
    ("feb", "february"),
    ("mar", "march"),
    ("apr", "april"),
    ("may", "may"),
    ("jun", "june"),
    ("jul", "july"),
    ("aug", "august"),
    ("sep", "september"),
    ("oct", "october"),
    ("nov", "november"),
    ("dec", "december"),
];

/// Earliest year the date parsers accept.
pub const MIN_YEAR: i32 = 1;

/// Latest year the date parsers accept.
pub const MAX_YEAR: i32 = 9999;

/// The textual date formats found in the source data files.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::{parse_date, DateFormat};
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
/// assert_eq!(parse_date("16 Sep 2024", DateFormat::Record).unwrap(), expected);
/// assert_eq!(parse_date("16/09/2024", DateFormat::Slash).unwrap(), expected);
/// assert_eq!(parse_date("2024-09-16", DateFormat::Iso).unwrap(), expected);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// "D Month YYYY", used by leave records ("16 Sep 2024", "01 September 2024").
    Record,
    /// "dd/mm/yyyy", used by the structured rota file.
    Slash,
    /// ISO 8601 "YYYY-MM-DD".
    Iso,
}

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the Monday–Friday dates in the inclusive range `[start, end]`.
///
/// A reversed range (end before start) counts as empty and returns 0.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::weekdays_between;
/// use chrono::NaiveDate;
///
/// // Friday 2024-01-05 to Monday 2024-01-08
/// let start = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
/// assert_eq!(weekdays_between(start, end), 2);
/// assert_eq!(weekdays_between(end, start), 0);
/// ```
pub fn weekdays_between(start: NaiveDate, end: NaiveDate) -> u32 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !is_weekend(*day))
        .count() as u32
}

/// Counts every date in the inclusive range `[start, end]`, weekends included.
///
/// A reversed range returns 0.
pub fn calendar_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    ((end - start).num_days() + 1) as u32
}

/// Returns the Monday on or before `date`.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::week_start;
/// use chrono::NaiveDate;
///
/// // Sunday 2025-01-19 belongs to the week starting Monday 2025-01-13
/// let sunday = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();
/// assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date - chrono::Duration::days(i64::from(offset))
}

/// Finds the first `weekday` on or after `date`, stepping one day at a time.
pub(crate) fn first_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut current = date;
    while current.weekday() != weekday {
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    current
}

/// Looks up a month number (1-12) from an abbreviated or full English name.
///
/// Matching is case-insensitive. "Sept" is accepted as well as "Sep".
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.trim().to_ascii_lowercase();
    if lower == "sept" {
        return Some(9);
    }
    MONTH_NAMES
        .iter()
        .position(|(short, full)| lower == *short || lower == *full)
        .map(|index| index as u32 + 1)
}

/// Parses a "D Month YYYY" date such as "16 Sep 2024".
///
/// The day may carry a leading zero and the month may be abbreviated or
/// spelled out in full.
///
/// # Errors
///
/// Returns [`EngineError::DateParse`] when the text does not have exactly
/// three parts, the month name is not recognized, the day or year is not
/// plain digits, the year is outside [`MIN_YEAR`]..=[`MAX_YEAR`], or the date
/// does not exist.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::parse_record_date;
/// use chrono::NaiveDate;
///
/// let date = parse_record_date("16 Sep 2024").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 9, 16).unwrap());
///
/// assert!(parse_record_date("16 Sepember 2024").is_err());
/// ```
pub fn parse_record_date(text: &str) -> EngineResult<NaiveDate> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(EngineError::date_parse(
            text,
            "expected 'D Month YYYY'",
        ));
    };

    let day = parse_digits(text, day, "day")?;
    let month = month_from_name(month)
        .ok_or_else(|| EngineError::date_parse(text, format!("unrecognized month '{}'", month)))?;
    let year = parse_digits(text, year, "year")?;

    build_date(text, year, month, day)
}

/// Parses a "dd/mm/yyyy" date such as "13/01/2025".
///
/// # Errors
///
/// Returns [`EngineError::DateParse`] on malformed input.
pub fn parse_slash_date(text: &str) -> EngineResult<NaiveDate> {
    let parts: Vec<&str> = text.trim().split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(EngineError::date_parse(text, "expected 'dd/mm/yyyy'"));
    };

    let day = parse_digits(text, day, "day")?;
    let month = parse_digits(text, month, "month")?;
    let year = parse_digits(text, year, "year")?;

    build_date(text, year, month, day)
}

/// Parses one date component made only of ASCII digits.
///
/// Signs and other decorations that `str::parse` tolerates are rejected.
fn parse_digits(text: &str, part: &str, what: &str) -> EngineResult<u32> {
    let non_numeric = || EngineError::date_parse(text, format!("non-numeric {} '{}'", what, part));
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(non_numeric());
    }
    part.parse().map_err(|_| non_numeric())
}

/// Rejects years outside [`MIN_YEAR`]..=[`MAX_YEAR`].
fn check_year(text: &str, year: i32) -> EngineResult<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(EngineError::date_parse(
            text,
            format!("year {} outside {}..={}", year, MIN_YEAR, MAX_YEAR),
        ))
    }
}

fn build_date(text: &str, year: u32, month: u32, day: u32) -> EngineResult<NaiveDate> {
    let year = i32::try_from(year)
        .map_err(|_| EngineError::date_parse(text, format!("year {} out of range", year)))?;
    check_year(text, year)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| EngineError::date_parse(text, "no such calendar date"))
}

/// Parses `text` in the given [`DateFormat`].
pub fn parse_date(text: &str, format: DateFormat) -> EngineResult<NaiveDate> {
    match format {
        DateFormat::Record => parse_record_date(text),
        DateFormat::Slash => parse_slash_date(text),
        DateFormat::Iso => {
            let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map_err(|e| EngineError::date_parse(text, e.to_string()))?;
            check_year(text, date.year())?;
            Ok(date)
        }
    }
}

/// Parses a date in whichever supported format it is written in.
///
/// The format is chosen from the shape of the text: a `/` means
/// "dd/mm/yyyy", a `-` means ISO, anything else is treated as a record date.
pub fn parse_flexible_date(text: &str) -> EngineResult<NaiveDate> {
    let format = if text.contains('/') {
        DateFormat::Slash
    } else if text.contains('-') {
        DateFormat::Iso
    } else {
        DateFormat::Record
    };
    parse_date(text, format)
}

/// Formats a date the way leave records write it ("16 Sep 2024").
pub fn format_record_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}
