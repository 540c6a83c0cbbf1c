//! CLI argument definitions for the attendance recorder.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use recorder_core::store::DEFAULT_STORE_FILE;

/// Attendance tracking from sign-in sheet exports
#[derive(Parser, Debug)]
#[command(
    name = "attendance-recorder",
    about = "Import sign-in sheet exports and report attendance",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store document path
    #[arg(long, global = true, default_value = DEFAULT_STORE_FILE)]
    pub store: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a CSV or TSV export into the store.
    Import {
        /// Path to the export file.
        file: PathBuf,

        /// Label recorded as the source of every imported event.
        #[arg(long)]
        source: Option<String>,

        /// Field delimiter; sniffed from the header row when omitted.
        #[arg(long)]
        delimiter: Option<char>,
    },

    /// List profiles with their event counts.
    Profiles,

    /// Show who attended on which date.
    Table,

    /// Show distinct attendee counts per date.
    Summary,

    /// Show one profile's full event history.
    History {
        /// Email of the profile; case and surrounding whitespace are ignored.
        email: String,
    },

    /// Write the store document to a file or stdout.
    Export {
        /// Destination path; prints to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
