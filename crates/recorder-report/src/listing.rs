//! Derived listing views over the store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use recorder_core::store::AttendanceStore;

/// Placeholder shown for profiles without a display name.
pub const UNKNOWN_NAME: &str = "(Unknown)";

/// Display form of a raw profile name.
pub fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        UNKNOWN_NAME
    } else {
        name
    }
}

/// One line of the profile listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    /// Raw display name; may be empty.
    pub name: String,
    pub email: String,
    pub event_count: usize,
}

/// All profiles as listing rows, sorted by case-insensitive name, then email.
pub fn profile_rows(store: &AttendanceStore) -> Vec<ProfileRow> {
    let mut rows: Vec<ProfileRow> = store
        .profiles()
        .map(|profile| ProfileRow {
            name: profile.name.clone(),
            email: profile.email.clone(),
            event_count: profile.event_count(),
        })
        .collect();
    rows.sort_by_key(|row| (row.name.to_lowercase(), row.email.clone()));
    rows
}

/// Distinct attendees per calendar date, in date order.
pub fn daily_counts(store: &AttendanceStore) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for profile in store.profiles() {
        // A profile counts once per date, however many events it has that day.
        let dates: BTreeSet<NaiveDate> =
            profile.events.iter().map(|e| e.timestamp.date()).collect();
        for date in dates {
            *counts.entry(date).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use recorder_core::models::AttendanceEvent;

    // ── Helpers ────────────────────────────────────────────────────────────

    fn dt(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn sample_store() -> AttendanceStore {
        let mut store = AttendanceStore::new();
        let alex = store.get_or_create("alex@example.com", "alex");
        alex.record_event(AttendanceEvent {
            timestamp: dt(1, 9),
            source: None,
        });
        alex.record_event(AttendanceEvent {
            timestamp: dt(1, 14),
            source: None,
        });
        alex.record_event(AttendanceEvent {
            timestamp: dt(8, 9),
            source: None,
        });
        let bea = store.get_or_create("bea@example.com", "Bea");
        bea.record_event(AttendanceEvent {
            timestamp: dt(1, 9),
            source: None,
        });
        store.get_or_create("zed@example.com", "");
        store
    }

    // ── display_name ───────────────────────────────────────────────────────

    #[test]
    fn test_display_name_falls_back_for_blank_names() {
        assert_eq!(display_name("Alex"), "Alex");
        assert_eq!(display_name(""), UNKNOWN_NAME);
        assert_eq!(display_name("   "), UNKNOWN_NAME);
    }

    // ── profile_rows ───────────────────────────────────────────────────────

    #[test]
    fn test_profile_rows_sorted_case_insensitively() {
        let rows = profile_rows(&sample_store());

        let order: Vec<&str> = rows.iter().map(|r| r.email.as_str()).collect();
        // Empty name first, then "alex" and "Bea" compared case-insensitively.
        assert_eq!(
            order,
            vec!["zed@example.com", "alex@example.com", "bea@example.com"]
        );
        assert_eq!(rows[1].event_count, 3);
    }

    // ── daily_counts ───────────────────────────────────────────────────────

    #[test]
    fn test_daily_counts_distinct_attendees_per_date() {
        let counts = daily_counts(&sample_store());

        // March 1st: alex (twice, counted once) and bea. March 8th: alex only.
        assert_eq!(counts, vec![(date(1), 2), (date(8), 1)]);
    }

    #[test]
    fn test_daily_counts_empty_store() {
        assert!(daily_counts(&AttendanceStore::new()).is_empty());
    }
}
