//! Timestamp parsing and serialisation for attendance data.
//!
//! Attendance exports carry timezone-naive wall-clock strings in a handful
//! of spellings; everything is parsed to at most second precision and stored
//! in one canonical ISO 8601 form.

use chrono::NaiveDateTime;
use tracing::warn;

/// Serialised timestamp shape in the store document, e.g. `2024-03-01T09:05:00`.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Accepted input spellings, tried in order; the first match wins.
///
/// Covers Microsoft Forms US exports (24-hour and 12-hour clock) and
/// hand-maintained ISO-like sheets. Minute-precision forms parse with
/// `:00` seconds.
const INPUT_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Parse a raw timestamp cell into a timezone-naive datetime.
///
/// The input is trimmed first. Returns `None` (with a warning) when no
/// accepted form matches. Parsing is deterministic: the same string always
/// yields the same result.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in INPUT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    warn!("could not parse timestamp string {:?}", trimmed);
    None
}

/// Serde adapter for [`NaiveDateTime`] fields serialised as [`ISO_FORMAT`].
///
/// Deserialisation is strict: only the canonical form is accepted, so a
/// malformed store document fails the load instead of silently re-parsing.
pub mod iso_seconds {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ISO_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(ISO_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, ISO_FORMAT).map_err(serde::de::Error::custom)
    }
}
