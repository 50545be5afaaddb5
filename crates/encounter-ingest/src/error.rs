//! Error types for form-response ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an uploaded table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File is not UTF-8.
    #[error("unsupported encoding {encoding} in {source_name}; re-export the file as UTF-8")]
    UnsupportedEncoding {
        source_name: String,
        encoding: &'static str,
    },

    /// File extension is not a supported upload format.
    #[error("unsupported input format '{extension}' for {path}; expected .csv or .xlsx")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Polars failed to parse the CSV.
    #[error("failed to parse CSV {source_name}: {message}")]
    CsvParse { source_name: String, message: String },

    /// Input has no header row.
    #[error("CSV input is empty: {source_name}")]
    EmptyCsv { source_name: String },

    /// Calamine could not open the workbook or its first sheet.
    #[error("failed to read workbook {source_name}: {message}")]
    WorkbookRead { source_name: String, message: String },

    /// The workbook has no sheet, or its first sheet has no header row.
    #[error("workbook {source_name} has no data in its first sheet")]
    EmptyWorkbook { source_name: String },

    /// A header cell is blank.
    #[error("input {source_name} has an empty column name")]
    EmptyColumnName { source_name: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "input file not found: /path/to/file.csv");
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = IngestError::UnsupportedFormat {
            path: PathBuf::from("responses.xls"),
            extension: "xls".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported input format 'xls' for responses.xls; expected .csv or .xlsx"
        );
    }
}
