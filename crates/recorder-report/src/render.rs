//! Terminal table rendering.
//!
//! Every view is returned as a [`Table`] so the caller decides where it
//! goes; colors are stripped automatically when stdout is not a terminal.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use recorder_core::models::PersonProfile;
use recorder_core::store::AttendanceStore;
use recorder_core::timestamp::ISO_FORMAT;

use crate::listing::{daily_counts, display_name, profile_rows};
use crate::matrix::build_matrix;

// ── Cell helpers ──────────────────────────────────────────────────────────────

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn name_cell(name: &str) -> Cell {
    if name.trim().is_empty() {
        dim_cell(display_name(name))
    } else {
        Cell::new(name)
    }
}

fn mark_cell(present: bool) -> Cell {
    if present {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

// ── Views ─────────────────────────────────────────────────────────────────────

/// The profile listing with per-profile event counts and a total row.
pub fn profiles_table(store: &AttendanceStore) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Email"),
        header_cell("Events"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    let rows = profile_rows(store);
    let mut total_events = 0usize;
    for row in &rows {
        total_events += row.event_count;
        table.add_row(vec![
            name_cell(&row.name),
            Cell::new(&row.email),
            Cell::new(row.event_count),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} profile(s)", rows.len())),
        Cell::new(total_events).add_attribute(Attribute::Bold),
    ]);
    table
}

/// The attendance matrix: one column per distinct event date.
pub fn matrix_table(store: &AttendanceStore) -> Table {
    let matrix = build_matrix(store);

    let mut table = Table::new();
    let mut headers = vec![header_cell("Name"), header_cell("Email")];
    headers.extend(matrix.dates.iter().map(|d| header_cell(&d.to_string())));
    table.set_header(headers);
    apply_table_style(&mut table);
    for index in 2..2 + matrix.dates.len() {
        align_column(&mut table, index, CellAlignment::Center);
    }

    for row in &matrix.rows {
        let mut cells = vec![name_cell(&row.name), Cell::new(&row.email)];
        cells.extend(row.present.iter().map(|&p| mark_cell(p)));
        table.add_row(cells);
    }
    table
}

/// Distinct attendees per calendar date.
pub fn summary_table(store: &AttendanceStore) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Date"), header_cell("Attendees")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for (date, count) in daily_counts(store) {
        table.add_row(vec![Cell::new(date.to_string()), Cell::new(count)]);
    }
    table
}

/// One profile's events in timestamp order.
pub fn history_table(profile: &PersonProfile) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Timestamp"), header_cell("Source")]);
    apply_table_style(&mut table);

    for event in &profile.events {
        let source_cell = match event.source.as_deref() {
            Some(source) if !source.is_empty() => Cell::new(source),
            _ => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(event.timestamp.format(ISO_FORMAT).to_string()),
            source_cell,
        ]);
    }
    table
}
