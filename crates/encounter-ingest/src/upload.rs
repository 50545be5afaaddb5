//! Upload dispatch: pick a reader from the file extension.

use std::path::Path;

use polars::prelude::DataFrame;

use crate::csv::read_csv_bytes;
use crate::error::{IngestError, Result};
use crate::xlsx::read_xlsx_bytes;

/// Maximum upload size (500 MB default).
pub const MAX_UPLOAD_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Options controlling how an upload is read.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Files larger than this are rejected before reading.
    pub max_file_size: u64,
    /// Let Polars infer CSV column dtypes. When false every column is read
    /// as text. Spreadsheets are always read as text.
    pub infer_schema: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_UPLOAD_FILE_SIZE,
            infer_schema: false,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    #[must_use]
    pub fn with_infer_schema(mut self, infer_schema: bool) -> Self {
        self.infer_schema = infer_schema;
        self
    }
}

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
    Xlsx,
}

impl UploadFormat {
    /// Format implied by a file extension. Files without one are read as CSV.
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            return Ok(Self::Csv);
        };
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
            }),
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Read an uploaded `.csv` or `.xlsx` file from disk.
pub fn read_raw_table(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    let format = UploadFormat::from_path(path)?;
    check_file_size_with_limit(path, options.max_file_size)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_upload_bytes(bytes, &path.display().to_string(), format, options)
}

/// Read in-memory upload bytes of a known format.
pub fn read_upload_bytes(
    bytes: Vec<u8>,
    source_name: &str,
    format: UploadFormat,
    options: &IngestOptions,
) -> Result<DataFrame> {
    match format {
        UploadFormat::Csv => read_csv_bytes(bytes, source_name, options),
        UploadFormat::Xlsx => read_xlsx_bytes(bytes, source_name),
    }
}
