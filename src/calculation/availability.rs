//! Who is on leave on a given day.

use chrono::NaiveDate;

use crate::models::{LeaveRecord, Registrar};

/// Returns true if any record covers `date`.
///
/// Records ending before they start cover nothing.
pub fn is_on_leave(records: &[LeaveRecord], date: NaiveDate) -> bool {
    records.iter().any(|record| record.contains(date))
}

/// Names of the registrars on leave on `date`, in registrar order.
///
/// Each registrar appears at most once however many records cover the day.
/// Unreadable records are ignored.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::who_on_leave;
/// use rota_engine::models::{Allowance, RawLeaveRecord, Registrar};
/// use chrono::NaiveDate;
///
/// let registrars = vec![
///     Registrar::new("Dr A", Allowance::default()).with_leave(RawLeaveRecord {
///         start: "13 Jan 2025".to_string(),
///         end: "17 Jan 2025".to_string(),
///         leave_type: "Annual".to_string(),
///         half_day: false,
///     }),
///     Registrar::new("Dr B", Allowance::default()),
/// ];
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// assert_eq!(who_on_leave(&registrars, date), vec!["Dr A".to_string()]);
/// ```
pub fn who_on_leave(registrars: &[Registrar], date: NaiveDate) -> Vec<String> {
    registrars
        .iter()
        .filter(|registrar| is_on_leave(&registrar.leave(), date))
        .map(|registrar| registrar.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allowance, LeaveType, RawLeaveRecord};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn raw(start: &str, end: &str) -> RawLeaveRecord {
        RawLeaveRecord {
            start: start.to_string(),
            end: end.to_string(),
            leave_type: "Annual".to_string(),
            half_day: false,
        }
    }

    #[test]
    fn test_on_leave_is_inclusive() {
        let records = vec![LeaveRecord::new(
            make_date("2025-01-13"),
            make_date("2025-01-17"),
            LeaveType::Annual,
        )];
        assert!(is_on_leave(&records, make_date("2025-01-13")));
        assert!(is_on_leave(&records, make_date("2025-01-17")));
        assert!(!is_on_leave(&records, make_date("2025-01-18")));
        assert!(!is_on_leave(&records, make_date("2025-01-12")));
    }

    #[test]
    fn test_reversed_record_covers_nothing() {
        let records = vec![LeaveRecord::new(
            make_date("2025-01-17"),
            make_date("2025-01-13"),
            LeaveType::Annual,
        )];
        assert!(!is_on_leave(&records, make_date("2025-01-15")));
    }

    #[test]
    fn test_overlapping_records_list_registrar_once() {
        let registrars = vec![
            Registrar::new("Dr Ben Okafor", Allowance::default())
                .with_leave(raw("13 Jan 2025", "17 Jan 2025"))
                .with_leave(raw("15 Jan 2025", "15 Jan 2025")),
            Registrar::new("Dr Chloe Reyes", Allowance::default()),
            Registrar::new("Dr Alice Morgan", Allowance::default())
                .with_leave(raw("14 Jan 2025", "16 Jan 2025")),
        ];

        assert_eq!(
            who_on_leave(&registrars, make_date("2025-01-15")),
            vec!["Dr Ben Okafor".to_string(), "Dr Alice Morgan".to_string()]
        );
        assert!(who_on_leave(&registrars, make_date("2025-01-20")).is_empty());
    }

    #[test]
    fn test_unreadable_records_are_ignored() {
        let registrars = vec![
            Registrar::new("Dr A", Allowance::default()).with_leave(raw("12 Foo 2025", "17 Jan 2025")),
        ];
        assert!(who_on_leave(&registrars, make_date("2025-01-15")).is_empty());
    }
}
