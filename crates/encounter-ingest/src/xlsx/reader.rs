//! `.xlsx` upload reading.
//!
//! The first worksheet is the table: its first row holds the column names,
//! every later row is a record. Cells are read as text so the transform sees
//! the same shape as a CSV upload.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use encounter_common::format_numeric;

use crate::csv::validate_dataframe_shape;
use crate::error::{IngestError, Result};

/// Read `.xlsx` bytes into an all-text DataFrame.
///
/// `source_name` is only used in errors and log fields.
pub fn read_xlsx_bytes(bytes: Vec<u8>, source_name: &str) -> Result<DataFrame> {
    let workbook_error = |message: String| IngestError::WorkbookRead {
        source_name: source_name.to_string(),
        message,
    };
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes)).map_err(|e: calamine::XlsxError| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyWorkbook {
            source_name: source_name.to_string(),
        })?
        .map_err(|e| workbook_error(e.to_string()))?;

    let df = range_to_frame(&range, source_name)?;
    validate_dataframe_shape(&df, source_name)?;
    debug!(
        source = %source_name,
        rows = df.height(),
        columns = df.width(),
        "worksheet loaded"
    );
    Ok(df)
}

fn range_to_frame(range: &Range<Data>, source_name: &str) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptyWorkbook {
            source_name: source_name.to_string(),
        });
    };
    let records: Vec<&[Data]> = rows.collect();

    let columns: Vec<Column> = header
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<Option<String>> = records
                .iter()
                .map(|record| record.get(idx).and_then(sheet_cell_text))
                .collect();
            let name = sheet_cell_text(name).unwrap_or_default();
            Series::new(name.into(), values).into_column()
        })
        .collect();

    DataFrame::new(columns).map_err(|e| IngestError::WorkbookRead {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// Text of a worksheet cell, `None` for empty and error cells.
///
/// Whole-number floats lose their `.0` so ranks and ids read as in a CSV;
/// date cells render as `YYYY-MM-DD HH:MM:SS`.
fn sheet_cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(v) => format_numeric(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format_numeric(dt.as_f64()),
        },
    };
    (!text.is_empty()).then_some(text)
}
