//! Encounter table export.
//!
//! Writes comma-delimited UTF-8 CSV with a header row of the literal output
//! column names and no index column. Missing values are empty fields.

mod csv_export;
mod error;

pub use csv_export::{
    DEFAULT_OUTPUT_FILE_NAME, encounters_to_csv_bytes, write_encounters_csv,
    write_encounters_csv_file,
};
pub use error::{OutputError, Result};
