use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::timestamp;

/// The three column roles an attendance export must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// The submission / completion time column.
    Timestamp,
    /// The participant display-name column.
    Name,
    /// The participant email column.
    Email,
}

impl ColumnRole {
    /// Lowercase role name as used in error messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Timestamp => "timestamp",
            ColumnRole::Name => "name",
            ColumnRole::Email => "email",
        }
    }
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded attendance instance.
///
/// Immutable once stored; within a profile, events are identified by
/// `timestamp` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Timezone-naive event time, second precision.
    #[serde(with = "timestamp::iso_seconds")]
    pub timestamp: NaiveDateTime,
    /// Free-text session label (e.g. "Standup"); omitted from the document
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// The consolidated attendance record for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfile {
    /// Display name; the most recent import wins on conflict.
    pub name: String,
    /// Trimmed lowercase email, the profile's identity.
    pub email: String,
    /// Events ordered by timestamp, unique by timestamp.
    #[serde(default)]
    pub events: Vec<AttendanceEvent>,
}

impl PersonProfile {
    /// Create an empty profile. Callers pass an already-normalised email.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            events: Vec::new(),
        }
    }

    /// `true` when an event with exactly this timestamp is already recorded.
    pub fn has_timestamp(&self, timestamp: NaiveDateTime) -> bool {
        self.events
            .binary_search_by_key(&timestamp, |e| e.timestamp)
            .is_ok()
    }

    /// Insert `event`, keeping the list ordered by timestamp.
    ///
    /// Returns `false` (and drops the incoming event) when an event with the
    /// same timestamp already exists; the stored event is never overwritten.
    pub fn record_event(&mut self, event: AttendanceEvent) -> bool {
        match self
            .events
            .binary_search_by_key(&event.timestamp, |e| e.timestamp)
        {
            Ok(_) => false,
            Err(pos) => {
                self.events.insert(pos, event);
                true
            }
        }
    }

    /// Number of recorded events.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Re-establish the event ordering invariant after deserialising a
    /// hand-edited document: sort by timestamp, drop later duplicates.
    pub fn normalize_events(&mut self) {
        self.events.sort_by_key(|e| e.timestamp);
        self.events.dedup_by_key(|e| e.timestamp);
    }
}

/// One normalised data row produced by the import reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEntry {
    /// Trimmed lowercase email.
    pub email: String,
    /// Display name from the row, trimmed.
    pub name: String,
    /// Parsed submission time.
    pub timestamp: NaiveDateTime,
    /// Caller-supplied session label, verbatim.
    pub source: Option<String>,
}

impl AttendanceEntry {
    /// The event this row contributes to a profile.
    pub fn to_event(&self) -> AttendanceEvent {
        AttendanceEvent {
            timestamp: self.timestamp,
            source: self.source.clone(),
        }
    }
}

/// Normalise an email address into its identity form: trimmed and lowercased.
///
/// # Examples
///
/// ```
/// use recorder_core::models::normalize_email;
///
/// assert_eq!(normalize_email(" Alex@Example.com "), "alex@example.com");
/// assert_eq!(normalize_email("sam@example.com"), "sam@example.com");
/// ```
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// `true` when `email` has non-empty text on both sides of an `@`.
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}
