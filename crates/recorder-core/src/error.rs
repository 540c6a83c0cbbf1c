use std::path::PathBuf;
use thiserror::Error;

use crate::models::ColumnRole;

/// All fatal errors produced by the attendance recorder.
///
/// Row-local problems are not in here; they are collected as [`RowIssue`]
/// warnings and never abort an import.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// A data or store file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store document could not be written to disk.
    #[error("Failed to write store {path}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store document is not valid JSON.
    #[error("Failed to parse store JSON: {0}")]
    StoreParse(#[from] serde_json::Error),

    /// The store document parsed but violates a structural invariant.
    #[error("Corrupt store: {0}")]
    CorruptStore(String),

    /// No header cell matched the given role; nothing was imported.
    #[error("No {0} column found in header row")]
    MissingColumn(ColumnRole),

    /// The delimited input could not be decoded at all.
    #[error("Failed to read delimited data: {0}")]
    CsvRead(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the recorder crates.
pub type Result<T> = std::result::Result<T, RecorderError>;

/// A row-local problem recorded as a warning during import.
///
/// Line numbers are 1-based positions in the source file; the header row is
/// line 1, so the first data row is line 2.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowIssue {
    /// The row has fewer fields than the resolved header requires.
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The email field is empty or not a plausible address.
    #[error("line {line}: invalid email {value:?}")]
    InvalidEmail { line: u64, value: String },

    /// The timestamp field did not match any accepted form.
    #[error("line {line}: invalid timestamp {value:?}")]
    InvalidTimestamp { line: u64, value: String },
}

impl RowIssue {
    /// 1-based line number of the offending row.
    pub fn line(&self) -> u64 {
        match self {
            RowIssue::MalformedRow { line, .. }
            | RowIssue::InvalidEmail { line, .. }
            | RowIssue::InvalidTimestamp { line, .. } => *line,
        }
    }
}
