//! Import pipeline for the attendance recorder.
//!
//! Takes the raw text of a CSV/TSV attendance export through delimiter
//! sniffing, header-role resolution and row normalisation, then merges the
//! resulting events into the profile store.

pub mod header;
pub mod merge;
pub mod reader;

pub use recorder_core as core;
