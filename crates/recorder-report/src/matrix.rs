//! The attendance matrix: who was present on which date.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use recorder_core::store::AttendanceStore;

/// One profile's row of the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    /// Raw display name; may be empty.
    pub name: String,
    pub email: String,
    /// Presence flag per entry of [`AttendanceMatrix::dates`].
    pub present: Vec<bool>,
}

/// Distinct event dates as columns, one row per profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceMatrix {
    /// Distinct calendar dates across all events, ascending.
    pub dates: Vec<NaiveDate>,
    /// Rows sorted by case-insensitive name, then email.
    pub rows: Vec<MatrixRow>,
}

/// Build the matrix for every profile in `store`.
pub fn build_matrix(store: &AttendanceStore) -> AttendanceMatrix {
    let mut all_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    for profile in store.profiles() {
        all_dates.extend(profile.events.iter().map(|e| e.timestamp.date()));
    }
    let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

    let mut rows: Vec<MatrixRow> = store
        .profiles()
        .map(|profile| {
            let attended: BTreeSet<NaiveDate> =
                profile.events.iter().map(|e| e.timestamp.date()).collect();
            MatrixRow {
                name: profile.name.clone(),
                email: profile.email.clone(),
                present: dates.iter().map(|d| attended.contains(d)).collect(),
            }
        })
        .collect();
    rows.sort_by_key(|row| (row.name.to_lowercase(), row.email.clone()));

    AttendanceMatrix { dates, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use recorder_core::models::AttendanceEvent;

    fn dt(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn event(day: u32, h: u32) -> AttendanceEvent {
        AttendanceEvent {
            timestamp: dt(day, h),
            source: None,
        }
    }

    #[test]
    fn test_build_matrix_marks_presence_per_date() {
        let mut store = AttendanceStore::new();
        let alex = store.get_or_create("alex@example.com", "Alex");
        alex.record_event(event(1, 9));
        alex.record_event(event(8, 9));
        let sam = store.get_or_create("sam@example.com", "Sam");
        sam.record_event(event(8, 9));

        let matrix = build_matrix(&store);

        assert_eq!(matrix.dates, vec![date(1), date(8)]);
        assert_eq!(matrix.rows.len(), 2);
        assert_eq!(matrix.rows[0].email, "alex@example.com");
        assert_eq!(matrix.rows[0].present, vec![true, true]);
        assert_eq!(matrix.rows[1].present, vec![false, true]);
    }

    #[test]
    fn test_build_matrix_collapses_same_day_events() {
        let mut store = AttendanceStore::new();
        let alex = store.get_or_create("alex@example.com", "Alex");
        alex.record_event(event(1, 9));
        alex.record_event(event(1, 15));

        let matrix = build_matrix(&store);

        assert_eq!(matrix.dates, vec![date(1)]);
        assert_eq!(matrix.rows[0].present, vec![true]);
    }

    #[test]
    fn test_build_matrix_empty_store() {
        let matrix = build_matrix(&AttendanceStore::new());
        assert!(matrix.dates.is_empty());
        assert!(matrix.rows.is_empty());
    }

    #[test]
    fn test_build_matrix_profile_without_events_gets_empty_marks() {
        let mut store = AttendanceStore::new();
        let alex = store.get_or_create("alex@example.com", "Alex");
        alex.record_event(event(1, 9));
        store.get_or_create("sam@example.com", "Sam");

        let matrix = build_matrix(&store);

        assert_eq!(matrix.rows[1].present, vec![false]);
    }
}
