//! CSV upload reading.

use std::io::Cursor;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::upload::IngestOptions;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Reject UTF-16 input (detected by its BOM). UTF-8 with or without BOM is accepted.
pub fn validate_encoding(bytes: &[u8], source_name: &str) -> Result<()> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                source_name: source_name.to_string(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                source_name: source_name.to_string(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Validate DataFrame shape after loading.
///
/// Blank header names are an error; a header-only table is allowed and
/// simply produces no encounters.
pub fn validate_dataframe_shape(df: &DataFrame, source_name: &str) -> Result<()> {
    if df.height() == 0 {
        warn!(source = %source_name, "table has a header but no rows");
    }

    if df.width() > 500 {
        warn!(
            source = %source_name,
            columns = df.width(),
            "table has more than 500 columns"
        );
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                source_name: source_name.to_string(),
            });
        }
    }

    Ok(())
}

/// Read CSV bytes (for example an in-memory upload) into a DataFrame.
///
/// `source_name` is only used in errors and log fields.
pub fn read_csv_bytes(
    mut bytes: Vec<u8>,
    source_name: &str,
    options: &IngestOptions,
) -> Result<DataFrame> {
    validate_encoding(&bytes, source_name)?;
    if bytes.starts_with(&UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv {
            source_name: source_name.to_string(),
        });
    }

    let infer_schema_length = if options.infer_schema {
        Some(100)
    } else {
        Some(0)
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

    validate_dataframe_shape(&df, source_name)?;
    debug!(
        source = %source_name,
        rows = df.height(),
        columns = df.width(),
        "raw table loaded"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(content: &str) -> Result<DataFrame> {
        read_csv_bytes(
            content.as_bytes().to_vec(),
            "upload.csv",
            &IngestOptions::default(),
        )
    }

    #[test]
    fn test_reads_every_column_as_text() {
        let df = read("patient_user_id,form_response_rank\n101,1\n102,2\n").unwrap();
        assert_eq!(df.height(), 2);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &polars::prelude::DataType::String);
        }
    }

    #[test]
    fn test_strips_utf8_bom() {
        let df = read("\u{feff}A,B\n1,2\n").unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_rejects_utf16() {
        let result = read_csv_bytes(
            vec![0xFF, 0xFE, b'A', 0],
            "upload.csv",
            &IngestOptions::default(),
        );
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(read(""), Err(IngestError::EmptyCsv { .. })));
        assert!(matches!(read("\n\n"), Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_header_only_is_allowed() {
        let df = read("A,B\n").unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }
}
