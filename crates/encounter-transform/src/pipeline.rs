//! End-to-end encounter transform.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use encounter_model::QuestionMap;

use crate::aggregate::{RawTable, aggregate_encounters};
use crate::error::Result;
use crate::table::EncounterTable;
use crate::interval::{assign_days_between, sort_encounters};
use crate::numbering::PatientNumbering;

/// Convert raw form-response rows into one sorted row per patient encounter.
///
/// Stages, in order:
///
/// 1. normalize submission timestamps to UTC (unparseable → missing)
/// 2. number patients in first-appearance order
/// 3. group by (patient identifier, encounter rank) and derive fields
/// 4. sort by (patient number, date)
/// 5. compute days since the patient's previous encounter
///
/// # Errors
///
/// Returns [`crate::TransformError::MissingColumn`] when a required raw
/// column is absent. Malformed cells never fail.
pub fn process_encounter_data(df: &DataFrame, questions: &QuestionMap) -> Result<EncounterTable> {
    let span = info_span!("transform", row_count = df.height());
    let _guard = span.enter();
    let start = Instant::now();

    let table = RawTable::from_frame(df)?;
    let numbering = PatientNumbering::from_ids(&table.patient_ids);
    let mut rows = aggregate_encounters(&table, &numbering, questions);
    sort_encounters(&mut rows);
    assign_days_between(&mut rows);

    info!(
        patient_count = numbering.len(),
        encounter_count = rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    Ok(EncounterTable::new(rows))
}
