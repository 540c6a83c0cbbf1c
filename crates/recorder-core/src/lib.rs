//! Core layer for the attendance recorder.
//!
//! Defines the data model (events, profiles, the email-keyed store), the
//! error taxonomy shared by all crates, timestamp parsing, and the JSON
//! persistence of the store document.

pub mod error;
pub mod models;
pub mod store;
pub mod timestamp;
