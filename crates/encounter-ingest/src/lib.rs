//! Form-response ingestion.
//!
//! Reads an uploaded form-response export (`.csv` or `.xlsx`) into a Polars
//! DataFrame. Every column is read as text; typing happens later, cell by
//! cell, in the transform.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use encounter_ingest::{IngestOptions, read_raw_table};
//!
//! let df = read_raw_table(Path::new("responses.xlsx"), &IngestOptions::default())?;
//! ```

mod csv;
mod error;
mod upload;
mod xlsx;

pub use crate::csv::{read_csv_bytes, validate_dataframe_shape, validate_encoding};
pub use crate::xlsx::read_xlsx_bytes;
pub use error::{IngestError, Result};
pub use upload::{
    IngestOptions, MAX_UPLOAD_FILE_SIZE, UploadFormat, check_file_size_with_limit,
    read_raw_table, read_upload_bytes,
};
