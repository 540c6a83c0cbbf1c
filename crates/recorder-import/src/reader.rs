//! Delimited-text reading and row normalisation.
//!
//! Turns raw CSV/TSV export text into a lazy sequence of
//! [`AttendanceEntry`] values. The header row is resolved up front (an
//! export without the three required roles is rejected before any data row
//! is read); after that every data row either normalises cleanly or turns
//! into a [`RowIssue`] warning, so a few bad rows never block the rest of
//! the file.

use recorder_core::error::{RecorderError, Result, RowIssue};
use recorder_core::models::{is_plausible_email, normalize_email, AttendanceEntry};
use recorder_core::timestamp::parse_timestamp;
use tracing::{debug, warn};

use crate::header::{resolve_headers, HeaderColumns};

/// Candidate delimiters, preferred in this order on ties.
const DELIMITERS: &[u8] = &[b',', b'\t', b';'];

/// Guess the field delimiter from the first line of `text`.
///
/// The candidate occurring most often in that line wins; when none occurs
/// at all, the comma is assumed.
pub fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or("");

    let mut best = b',';
    let mut best_count = 0usize;
    for &candidate in DELIMITERS {
        let count = first_line.bytes().filter(|&b| b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Drop a leading UTF-8 byte-order mark; Forms exports carry one.
fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

// ── RowReader ─────────────────────────────────────────────────────────────────

/// Lazy reader over the data rows of one attendance export.
///
/// Yields `Ok(entry)` for every row that normalises cleanly and
/// `Err(issue)` for row-local failures. The sequence is finite and not
/// restartable; collect what you need on the way through.
pub struct RowReader<'a> {
    records: csv::StringRecordsIntoIter<&'a [u8]>,
    columns: HeaderColumns,
    header_len: usize,
    source: Option<String>,
}

impl<'a> RowReader<'a> {
    /// Build a reader over `text`, resolving the header row immediately.
    ///
    /// `source` is attached verbatim to every produced entry. `delimiter`
    /// bypasses sniffing when given. Fails with
    /// [`RecorderError::MissingColumn`] when a role cannot be resolved;
    /// no data row has been consumed at that point.
    pub fn from_text(text: &'a str, source: Option<&str>, delimiter: Option<u8>) -> Result<Self> {
        let text = strip_bom(text);
        let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(text));

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| RecorderError::CsvRead(e.to_string()))?
            .clone();
        let columns = resolve_headers(headers.iter())?;

        debug!(
            "resolved header: timestamp={}, name={}, email={} (delimiter {:?})",
            columns.timestamp, columns.name, columns.email, delimiter as char
        );

        Ok(Self {
            records: reader.into_records(),
            columns,
            header_len: headers.len(),
            source: source.map(|s| s.to_string()),
        })
    }

    /// `true` when every field of the record is empty or whitespace.
    fn is_blank(record: &csv::StringRecord) -> bool {
        record.iter().all(|field| field.trim().is_empty())
    }

    /// Normalise one data row into an entry, or classify what is wrong
    /// with it.
    fn normalize_record(
        &self,
        record: &csv::StringRecord,
        line: u64,
    ) -> std::result::Result<AttendanceEntry, RowIssue> {
        if record.len() < self.header_len {
            return Err(RowIssue::MalformedRow {
                line,
                expected: self.header_len,
                found: record.len(),
            });
        }

        let raw_email = record.get(self.columns.email).unwrap_or("");
        let email = normalize_email(raw_email);
        if !is_plausible_email(&email) {
            return Err(RowIssue::InvalidEmail {
                line,
                value: raw_email.trim().to_string(),
            });
        }

        let raw_timestamp = record.get(self.columns.timestamp).unwrap_or("");
        let Some(timestamp) = parse_timestamp(raw_timestamp) else {
            return Err(RowIssue::InvalidTimestamp {
                line,
                value: raw_timestamp.trim().to_string(),
            });
        };

        let name = record.get(self.columns.name).unwrap_or("").trim().to_string();

        Ok(AttendanceEntry {
            email,
            name,
            timestamp,
            source: self.source.clone(),
        })
    }
}

impl<'a> Iterator for RowReader<'a> {
    type Item = std::result::Result<AttendanceEntry, RowIssue>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    warn!("skipping unreadable record: {}", e);
                    continue;
                }
            };

            // Trailing blank lines and all-empty rows are not data.
            if Self::is_blank(&record) {
                continue;
            }

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let row = self.normalize_record(&record, line);
            if let Err(issue) = &row {
                warn!("skipping row: {}", issue);
            }
            return Some(row);
        }
    }
}
