//! Terminal rendering of encounter rows.

use std::path::{Path, PathBuf};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use encounter_common::format_numeric;
use encounter_model::{EncounterRow, OUTPUT_COLUMNS, format_form_date};
use encounter_output::DEFAULT_OUTPUT_FILE_NAME;
use encounter_transform::EncounterTable;

const MISSING: &str = "-";

/// Columns holding numbers; rendered right-aligned.
const NUMERIC_COLUMNS: [usize; 5] = [0, 6, 7, 8, 12];

/// Resolve where the encounter CSV is written.
///
/// An explicit path wins; otherwise the default file name is placed next to
/// the input.
pub fn resolve_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(DEFAULT_OUTPUT_FILE_NAME),
    }
}

/// Display text for each output column of a row, `None` where the value is missing.
pub fn encounter_cells(row: &EncounterRow) -> Vec<Option<String>> {
    vec![
        row.patient_number.map(|n| n.to_string()),
        row.patient_id.clone(),
        row.encounter.clone(),
        row.medication_formulation.clone(),
        row.form_date.as_ref().map(format_form_date),
        row.gender.clone(),
        row.weight_lb.map(format_numeric),
        row.bmi.map(format_numeric),
        row.weight_change_lb.map(format_numeric),
        Some(row.dosage_change.to_string()),
        Some(row.other_medication_change.to_string()),
        row.height.clone(),
        Some(row.days_between_encounter.to_string()),
    ]
}

/// Build a table of the first `limit` encounters.
pub fn preview_table(table: &EncounterTable, limit: usize) -> Table {
    let mut preview = Table::new();
    preview.set_header(OUTPUT_COLUMNS.iter().map(|name| header_cell(name)));
    apply_preview_style(&mut preview);
    for index in NUMERIC_COLUMNS {
        align_column(&mut preview, index, CellAlignment::Right);
    }
    for row in table.rows.iter().take(limit) {
        preview.add_row(encounter_cells(row).into_iter().map(value_cell));
    }
    preview
}

fn apply_preview_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(200);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: Option<String>) -> Cell {
    match value {
        Some(text) if !text.is_empty() => Cell::new(text),
        _ => dim_cell(MISSING),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
