//! Tests for encounter CSV export.

use chrono::{TimeZone, Utc};

use encounter_model::{ChangeFlag, EncounterRow};
use encounter_output::{encounters_to_csv_bytes, write_encounters_csv_file};

fn sample_rows() -> Vec<EncounterRow> {
    vec![
        EncounterRow {
            patient_number: Some(1),
            patient_id: Some("u-17".to_string()),
            encounter: Some("1".to_string()),
            medication_formulation: Some("Semaglutide".to_string()),
            form_date: Some(Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap()),
            gender: Some("Female".to_string()),
            weight_lb: Some(150.0),
            bmi: Some(27.5),
            weight_change_lb: None,
            dosage_change: ChangeFlag::Yes,
            other_medication_change: ChangeFlag::No,
            height: Some("5'6\"".to_string()),
            days_between_encounter: 0,
        },
        EncounterRow {
            patient_number: None,
            patient_id: None,
            encounter: Some("2".to_string()),
            medication_formulation: None,
            form_date: None,
            gender: None,
            weight_lb: None,
            bmi: None,
            weight_change_lb: Some(-4.5),
            dosage_change: ChangeFlag::No,
            other_medication_change: ChangeFlag::Yes,
            height: None,
            days_between_encounter: 0,
        },
    ]
}

#[test]
fn test_exports_header_and_rows() {
    let bytes = encounters_to_csv_bytes(&sample_rows()).expect("export csv");
    let text = String::from_utf8(bytes).expect("utf-8");
    insta::assert_snapshot!(text, @r#"
    Patient Number,Patient ID,Encounter,Medication formulation,Date on which form was filled,Gender,Weight in lb,BMI,Change in weight (lbs),Dosage change of Rx,Change in other medications,Height,Days between encounter
    1,u-17,1,Semaglutide,2024-01-05 10:00:00+00:00,Female,150.0,27.5,,Yes,No,"5'6""",0
    ,,2,,,,,,-4.5,No,Yes,,0
    "#);
}

#[test]
fn test_empty_table_still_has_header() {
    let bytes = encounters_to_csv_bytes(&[]).expect("export csv");
    let text = String::from_utf8(bytes).expect("utf-8");
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("Patient Number,Patient ID,Encounter,"));
    assert!(text.trim_end().ends_with(",Height,Days between encounter"));
}

#[test]
fn test_writes_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("out.csv");
    write_encounters_csv_file(&path, &sample_rows()).expect("write file");
    let text = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("Semaglutide"));
}
