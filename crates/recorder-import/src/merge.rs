//! Merging normalised rows into the profile store.
//!
//! The merge is pure data manipulation: upsert the profile for each row's
//! email, let the incoming display name win, and insert the event unless an
//! event with the identical timestamp is already recorded. Re-running the
//! same import is a no-op apart from the counters.

use std::collections::HashSet;

use recorder_core::error::{Result, RowIssue};
use recorder_core::models::AttendanceEntry;
use recorder_core::store::AttendanceStore;
use tracing::debug;

use crate::reader::RowReader;

// ── Public types ──────────────────────────────────────────────────────────────

/// Counters describing the outcome of one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Distinct profiles created or updated by this import.
    pub profiles_touched: usize,
    /// Events newly inserted into a profile.
    pub events_added: usize,
    /// Events dropped because their timestamp was already recorded.
    pub duplicates_skipped: usize,
    /// Data rows skipped with a warning while reading.
    pub rows_skipped: usize,
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} event(s) added, {} duplicate(s) skipped, {} row(s) skipped across {} profile(s)",
            self.events_added, self.duplicates_skipped, self.rows_skipped, self.profiles_touched
        )
    }
}

/// Everything produced by one file import.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Merge counters.
    pub summary: ImportSummary,
    /// Row-level warnings, in file order.
    pub warnings: Vec<RowIssue>,
}

// ── Merge ─────────────────────────────────────────────────────────────────────

/// Fold normalised entries into `store`.
///
/// Per entry:
/// 1. Look up the profile by email, creating it when absent.
/// 2. Overwrite the stored display name when the incoming one differs
///    (most recent import wins; identity is always the email).
/// 3. Insert the event unless its timestamp is already recorded.
///
/// Events are never removed or mutated; a duplicate timestamp only bumps
/// the duplicate counter.
pub fn merge_entries<I>(store: &mut AttendanceStore, entries: I) -> ImportSummary
where
    I: IntoIterator<Item = AttendanceEntry>,
{
    let mut summary = ImportSummary::default();
    let mut touched: HashSet<String> = HashSet::new();

    for entry in entries {
        let profile = store.get_or_create(&entry.email, &entry.name);
        if profile.name != entry.name {
            debug!(
                "renaming {} from {:?} to {:?}",
                entry.email, profile.name, entry.name
            );
            profile.name = entry.name.clone();
        }

        if profile.record_event(entry.to_event()) {
            summary.events_added += 1;
        } else {
            debug!("duplicate event for {} at {}", entry.email, entry.timestamp);
            summary.duplicates_skipped += 1;
        }

        touched.insert(entry.email);
    }

    summary.profiles_touched = touched.len();
    summary
}

// ── Import pipeline ───────────────────────────────────────────────────────────

/// Run the full import pipeline over raw delimited text.
///
/// 1. Resolve the header row (fails fast when a role column is missing;
///    the store is untouched in that case).
/// 2. Normalise data rows lazily, collecting row-level warnings.
/// 3. Merge the surviving entries into `store`.
///
/// The updated store is left in `store`; the caller owns persisting it.
pub fn import_text(
    store: &mut AttendanceStore,
    text: &str,
    source: Option<&str>,
    delimiter: Option<u8>,
) -> Result<ImportOutcome> {
    let reader = RowReader::from_text(text, source, delimiter)?;

    let mut warnings: Vec<RowIssue> = Vec::new();
    let mut summary = merge_entries(
        store,
        reader.filter_map(|row| match row {
            Ok(entry) => Some(entry),
            Err(issue) => {
                warnings.push(issue);
                None
            }
        }),
    );
    summary.rows_skipped = warnings.len();

    debug!("import finished: {}", summary);

    Ok(ImportOutcome { summary, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use recorder_core::error::RecorderError;
    use recorder_core::models::ColumnRole;

    // ── Helpers ────────────────────────────────────────────────────────────

    fn dt(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn entry(email: &str, name: &str, h: u32, m: u32, s: u32) -> AttendanceEntry {
        AttendanceEntry {
            email: email.to_string(),
            name: name.to_string(),
            timestamp: dt(h, m, s),
            source: None,
        }
    }

    const STANDUP_CSV: &str = "Completion time,Name,Email\n\
                               3/1/2024 09:05:00,Alex,alex@example.com\n\
                               3/1/2024 09:05:00,Alex,alex@example.com\n\
                               3/1/2024 09:06:30,Sam,sam@example.com\n";

    // ── merge_entries ──────────────────────────────────────────────────────

    #[test]
    fn test_merge_creates_profiles_and_counts() {
        let mut store = AttendanceStore::new();
        let summary = merge_entries(
            &mut store,
            vec![
                entry("alex@example.com", "Alex", 9, 5, 0),
                entry("sam@example.com", "Sam", 9, 6, 0),
            ],
        );

        assert_eq!(store.len(), 2);
        assert_eq!(summary.profiles_touched, 2);
        assert_eq!(summary.events_added, 2);
        assert_eq!(summary.duplicates_skipped, 0);
    }

    #[test]
    fn test_merge_duplicate_timestamp_within_batch_recorded_once() {
        let mut store = AttendanceStore::new();
        let summary = merge_entries(
            &mut store,
            vec![
                entry("alex@example.com", "Alex", 9, 5, 0),
                entry("alex@example.com", "Alex", 9, 5, 0),
            ],
        );

        assert_eq!(summary.events_added, 1);
        assert_eq!(summary.duplicates_skipped, 1);
        assert_eq!(summary.profiles_touched, 1);
        assert_eq!(store.get("alex@example.com").unwrap().event_count(), 1);
    }

    #[test]
    fn test_merge_same_timestamp_different_profiles() {
        let mut store = AttendanceStore::new();
        let summary = merge_entries(
            &mut store,
            vec![
                entry("alex@example.com", "Alex", 9, 5, 0),
                entry("sam@example.com", "Sam", 9, 5, 0),
            ],
        );

        // Timestamps are only unique within a profile, not across the store.
        assert_eq!(summary.events_added, 2);
        assert_eq!(summary.duplicates_skipped, 0);
    }

    #[test]
    fn test_merge_last_name_wins() {
        let mut store = AttendanceStore::new();
        merge_entries(
            &mut store,
            vec![
                entry("alex@example.com", "Alex", 9, 5, 0),
                entry("alex@example.com", "Alexandra", 10, 0, 0),
            ],
        );

        assert_eq!(store.get("alex@example.com").unwrap().name, "Alexandra");
    }

    #[test]
    fn test_merge_preserves_existing_events() {
        let mut store = AttendanceStore::new();
        merge_entries(&mut store, vec![entry("alex@example.com", "Alex", 9, 0, 0)]);
        merge_entries(&mut store, vec![entry("alex@example.com", "Alex", 10, 0, 0)]);

        let profile = store.get("alex@example.com").unwrap();
        assert_eq!(profile.event_count(), 2);
        assert_eq!(profile.events[0].timestamp, dt(9, 0, 0));
    }

    // ── import_text ────────────────────────────────────────────────────────

    #[test]
    fn test_import_end_to_end() {
        let mut store = AttendanceStore::new();
        let outcome = import_text(&mut store, STANDUP_CSV, Some("Standup"), None).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(outcome.summary.profiles_touched, 2);
        assert_eq!(outcome.summary.events_added, 2);
        assert_eq!(outcome.summary.duplicates_skipped, 1);
        assert!(outcome.warnings.is_empty());

        let alex = store.get("alex@example.com").unwrap();
        assert_eq!(alex.event_count(), 1);
        assert_eq!(alex.events[0].source.as_deref(), Some("Standup"));
    }

    #[test]
    fn test_import_is_idempotent() {
        let mut store = AttendanceStore::new();
        import_text(&mut store, STANDUP_CSV, Some("Standup"), None).unwrap();
        let first_pass = store.clone();

        let outcome = import_text(&mut store, STANDUP_CSV, Some("Standup"), None).unwrap();

        assert_eq!(store, first_pass);
        assert_eq!(outcome.summary.events_added, 0);
        // Every valid row is now a duplicate.
        assert_eq!(outcome.summary.duplicates_skipped, 3);
    }

    #[test]
    fn test_import_merges_differently_cased_emails() {
        let text = "Completion time,Name,Email\n\
                    3/1/2024 09:05:00,Alex,Alex@Example.com\n\
                    3/1/2024 10:00:00,Alex, alex@example.com \n";
        let mut store = AttendanceStore::new();
        let outcome = import_text(&mut store, text, None, None).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(outcome.summary.profiles_touched, 1);
        let profile = store.get("alex@example.com").unwrap();
        assert_eq!(profile.email, "alex@example.com");
        assert_eq!(profile.event_count(), 2);
    }

    #[test]
    fn test_import_collects_row_warnings() {
        let text = "Completion time,Name,Email\n\
                    3/1/2024 09:05:00,Alex,alex@example.com\n\
                    whenever,Sam,sam@example.com\n\
                    3/1/2024 09:07:00,Pat,not-an-email\n";
        let mut store = AttendanceStore::new();
        let outcome = import_text(&mut store, text, None, None).unwrap();

        assert_eq!(outcome.summary.events_added, 1);
        assert_eq!(outcome.summary.rows_skipped, 2);
        assert_eq!(outcome.warnings.len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_import_missing_column_leaves_store_untouched() {
        let text = "Completion time,Name\n3/1/2024 09:05:00,Alex\n";
        let mut store = AttendanceStore::new();
        let err = import_text(&mut store, text, None, None).unwrap_err();

        assert!(matches!(
            err,
            RecorderError::MissingColumn(ColumnRole::Email)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_header_only_file() {
        let text = "Completion time,Name,Email\n";
        let mut store = AttendanceStore::new();
        let outcome = import_text(&mut store, text, None, None).unwrap();

        assert_eq!(outcome.summary, ImportSummary::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_summary_display() {
        let summary = ImportSummary {
            profiles_touched: 2,
            events_added: 3,
            duplicates_skipped: 1,
            rows_skipped: 1,
        };
        assert_eq!(
            summary.to_string(),
            "3 event(s) added, 1 duplicate(s) skipped, 1 row(s) skipped across 2 profile(s)"
        );
    }
}
