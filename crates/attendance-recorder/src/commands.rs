//! One function per subcommand.
//!
//! Each command loads the store, does its work and prints to stdout;
//! only `import` writes the store back.

use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use tracing::info;

use recorder_core::models::normalize_email;
use recorder_core::store::AttendanceStore;
use recorder_import::merge::import_text;
use recorder_report::listing::display_name;
use recorder_report::render::{history_table, matrix_table, profiles_table, summary_table};

/// Import one export file and persist the updated store.
pub fn run_import(
    store_path: &Path,
    file: &Path,
    source: Option<&str>,
    delimiter: Option<char>,
) -> Result<()> {
    let delimiter = match delimiter {
        Some(c) => {
            ensure!(c.is_ascii(), "delimiter must be an ASCII character, got {c:?}");
            Some(c as u8)
        }
        None => None,
    };

    let text =
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    let mut store = AttendanceStore::load(store_path)?;
    let outcome = import_text(&mut store, &text, source, delimiter)?;
    store.save(store_path)?;
    info!("store saved to {}", store_path.display());

    println!("Imported {}: {}", file.display(), outcome.summary);
    if !outcome.warnings.is_empty() {
        println!("Skipped rows:");
        for warning in &outcome.warnings {
            println!("  {warning}");
        }
    }
    Ok(())
}

pub fn run_profiles(store_path: &Path) -> Result<()> {
    let store = AttendanceStore::load(store_path)?;
    if store.is_empty() {
        println!("No attendance recorded yet.");
        return Ok(());
    }
    println!("{}", profiles_table(&store));
    Ok(())
}

pub fn run_table(store_path: &Path) -> Result<()> {
    let store = AttendanceStore::load(store_path)?;
    if store.is_empty() {
        println!("No attendance recorded yet.");
        return Ok(());
    }
    println!("{}", matrix_table(&store));
    Ok(())
}

pub fn run_summary(store_path: &Path) -> Result<()> {
    let store = AttendanceStore::load(store_path)?;
    if store.is_empty() {
        println!("No attendance recorded yet.");
        return Ok(());
    }
    println!("{}", summary_table(&store));
    Ok(())
}

/// Print one profile's event history.
pub fn run_history(store_path: &Path, email: &str) -> Result<()> {
    let store = AttendanceStore::load(store_path)?;
    let Some(profile) = store.get(email) else {
        bail!("no profile recorded for {}", normalize_email(email));
    };

    println!(
        "{} <{}>: {} event(s)",
        display_name(&profile.name),
        profile.email,
        profile.event_count()
    );
    println!("{}", history_table(profile));
    Ok(())
}

/// Write the store document to `output`, or stdout when absent.
pub fn run_export(store_path: &Path, output: Option<&Path>) -> Result<()> {
    let store = AttendanceStore::load(store_path)?;
    let json = store.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("exported {} profile(s) to {}", store.len(), path.display());
            println!("Exported data to {}", path.display());
        }
        None => print!("{json}"),
    }
    Ok(())
}
