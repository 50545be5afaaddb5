use std::path::PathBuf;

use encounter_transform::EncounterTable;

#[derive(Debug)]
pub struct ProcessResult {
    pub input: PathBuf,
    /// Written CSV, `None` on a dry run.
    pub output: Option<PathBuf>,
    pub raw_row_count: usize,
    pub table: EncounterTable,
    pub preview_rows: usize,
}
