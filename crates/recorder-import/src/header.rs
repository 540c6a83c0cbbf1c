//! Header-row classification for attendance exports.
//!
//! Export tools disagree on column naming ("Completion time" vs
//! "Submission Time", "Email" vs "Email Address"). Each header cell is
//! normalised and looked up in a fixed synonym table per role; the first
//! matching column per role wins.

use recorder_core::error::{RecorderError, Result};
use recorder_core::models::ColumnRole;

/// Header spellings accepted for the timestamp role.
const TIME_SYNONYMS: &[&str] = &[
    "timestamp",
    "submission time",
    "completion time",
    "start time",
    "date",
    "time",
];

/// Header spellings accepted for the name role.
const NAME_SYNONYMS: &[&str] = &["name", "full name", "first name"];

/// Header spellings accepted for the email role.
const EMAIL_SYNONYMS: &[&str] = &["email", "email address", "user email"];

/// Column indexes of the three resolved roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderColumns {
    pub timestamp: usize,
    pub name: usize,
    pub email: usize,
}

/// Normalise a header cell for synonym lookup: trim and lowercase.
pub fn normalize_header(cell: &str) -> String {
    cell.trim().to_lowercase()
}

/// Classify one normalised header cell, if it matches any role table.
fn classify(cell: &str) -> Option<ColumnRole> {
    if TIME_SYNONYMS.contains(&cell) {
        Some(ColumnRole::Timestamp)
    } else if NAME_SYNONYMS.contains(&cell) {
        Some(ColumnRole::Name)
    } else if EMAIL_SYNONYMS.contains(&cell) {
        Some(ColumnRole::Email)
    } else {
        None
    }
}

/// Resolve the header row into the three role columns.
///
/// The first column matching a role wins; later matches for an already
/// resolved role are ignored. Fails with [`RecorderError::MissingColumn`]
/// naming an unresolved role, before any data row is touched.
pub fn resolve_headers<I, S>(cells: I) -> Result<HeaderColumns>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut timestamp = None;
    let mut name = None;
    let mut email = None;

    for (index, cell) in cells.into_iter().enumerate() {
        let normalized = normalize_header(cell.as_ref());
        match classify(&normalized) {
            Some(ColumnRole::Timestamp) if timestamp.is_none() => timestamp = Some(index),
            Some(ColumnRole::Name) if name.is_none() => name = Some(index),
            Some(ColumnRole::Email) if email.is_none() => email = Some(index),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(RecorderError::MissingColumn(ColumnRole::Timestamp))?;
    let name = name.ok_or(RecorderError::MissingColumn(ColumnRole::Name))?;
    let email = email.ok_or(RecorderError::MissingColumn(ColumnRole::Email))?;

    Ok(HeaderColumns {
        timestamp,
        name,
        email,
    })
}
