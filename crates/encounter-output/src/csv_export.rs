use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use encounter_model::{EncounterRow, OUTPUT_COLUMNS};

use crate::error::{OutputError, Result};

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "filtered_encounter_data.csv";

/// Serialize encounter rows as CSV into any writer.
///
/// The header row is always written, even for an empty table.
pub fn write_encounters_csv<W: Write>(rows: &[EncounterRow], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Serialize encounter rows into UTF-8 CSV bytes (for downloads).
pub fn encounters_to_csv_bytes(rows: &[EncounterRow]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_encounters_csv(rows, &mut buffer)?;
    Ok(buffer)
}

/// Write encounter rows to a CSV file, replacing any existing file.
pub fn write_encounters_csv_file(path: &Path, rows: &[EncounterRow]) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_encounters_csv(rows, BufWriter::new(file))?;
    info!(
        output_path = %path.display(),
        record_count = rows.len(),
        "encounter CSV written"
    );
    Ok(())
}
