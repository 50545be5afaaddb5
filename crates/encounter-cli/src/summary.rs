use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use encounter_cli::preview_table;

use crate::types::ProcessResult;

pub fn print_summary(result: &ProcessResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!("Raw rows: {}", result.raw_row_count);
    println!("Encounters: {}", result.table.record_count());
    println!("Total Patients: {}", result.table.patient_count());
    if result.preview_rows == 0 || result.table.rows.is_empty() {
        return;
    }
    println!();
    println!("{}", preview_table(&result.table, result.preview_rows));
    let hidden = result
        .table
        .record_count()
        .saturating_sub(result.preview_rows);
    if hidden > 0 {
        println!("... {hidden} more encounter(s) in the CSV");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
