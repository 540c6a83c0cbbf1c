//! Reporting layer for Attendance Recorder.
//!
//! Shapes stored profiles into listing, matrix and summary views and
//! renders them as [`comfy_table`] tables for the terminal.

pub mod listing;
pub mod matrix;
pub mod render;

pub use recorder_core as core;
