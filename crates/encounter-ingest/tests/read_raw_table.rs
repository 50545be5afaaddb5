//! Tests for reading uploads from disk.

use std::io::Write;
use std::path::Path;

use encounter_ingest::{IngestError, IngestOptions, read_raw_table};
use polars::prelude::DataType;
use rust_xlsxwriter::Workbook;
use tempfile::{Builder, NamedTempFile};

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    write!(file, "{content}").expect("write content");
    file
}

const RAW: &str = "patient_user_id,form_response_rank,response_created_at,product_bundle_name,question_text,question_response_text
u-1,1,2024-01-05 10:00:00,Semaglutide,Your BMI is,27.5
u-1,1,2024-01-05 10:00:00,Semaglutide,Height (Feet),
";

#[test]
fn test_reads_csv_upload() {
    let file = temp_file(".csv", RAW);
    let df = read_raw_table(file.path(), &IngestOptions::default()).expect("read csv");
    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 6);
    let responses = df.column("question_response_text").expect("column");
    assert_eq!(responses.null_count(), 1);
}

fn write_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = [
        "patient_user_id",
        "form_response_rank",
        "response_created_at",
        "product_bundle_name",
        "question_text",
        "question_response_text",
    ];
    for (col, name) in (0u16..).zip(header) {
        sheet.write_string(0, col, name).expect("write header");
    }
    sheet.write_string(1, 0, "u-1").expect("write cell");
    sheet.write_number(1, 1, 1.0).expect("write cell");
    sheet
        .write_string(1, 2, "2024-01-05 10:00:00+00")
        .expect("write cell");
    sheet.write_string(1, 3, "Semaglutide").expect("write cell");
    sheet.write_string(1, 4, "Your BMI is").expect("write cell");
    sheet.write_number(1, 5, 27.5).expect("write cell");
    sheet.write_string(2, 0, "u-1").expect("write cell");
    sheet.write_number(2, 1, 1.0).expect("write cell");
    sheet.write_string(2, 4, "Height (Feet)").expect("write cell");
    workbook.save(path).expect("save workbook");
}

#[test]
fn test_reads_spreadsheet_upload() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("responses.xlsx");
    write_workbook(&path);

    let df = read_raw_table(&path, &IngestOptions::default()).expect("read xlsx");
    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 6);
    for column in df.get_columns() {
        assert_eq!(column.dtype(), &DataType::String);
    }

    let rank = df.column("form_response_rank").expect("column");
    assert_eq!(rank.str().expect("text").get(0), Some("1"));
    let bmi = df.column("question_response_text").expect("column");
    assert_eq!(bmi.str().expect("text").get(0), Some("27.5"));
    assert_eq!(bmi.null_count(), 1);
    let created = df.column("response_created_at").expect("column");
    assert_eq!(
        created.str().expect("text").get(0),
        Some("2024-01-05 10:00:00+00")
    );
}

#[test]
fn test_rejects_unknown_extension() {
    let file = temp_file(".xls", "legacy workbook");
    let result = read_raw_table(file.path(), &IngestOptions::default());
    match result {
        Err(IngestError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, "xls"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_corrupt_spreadsheet_is_reported() {
    let file = temp_file(".xlsx", "not really a workbook");
    let result = read_raw_table(file.path(), &IngestOptions::default());
    assert!(matches!(result, Err(IngestError::WorkbookRead { .. })));
}

#[test]
fn test_reports_missing_file() {
    let result = read_raw_table(
        Path::new("/nonexistent/responses.csv"),
        &IngestOptions::default(),
    );
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn test_enforces_size_limit() {
    let file = temp_file(".csv", RAW);
    let options = IngestOptions::default().with_max_file_size(16);
    let result = read_raw_table(file.path(), &options);
    assert!(matches!(
        result,
        Err(IngestError::FileTooLarge { max_size: 16, .. })
    ));
}

#[test]
fn test_inferred_schema_types_numeric_columns() {
    let file = temp_file(".csv", RAW);
    let options = IngestOptions::default().with_infer_schema(true);
    let df = read_raw_table(file.path(), &options).expect("read csv");
    let rank = df.column("form_response_rank").expect("column");
    assert!(rank.dtype().is_integer());
}
