//! Grouping of raw answer rows into encounters.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use tracing::{debug, warn};

use encounter_common::column_text_values;
use encounter_model::{ChangeFlag, EncounterRow, QuestionMap, RawColumn};

use crate::datetime::normalize_timestamps;
use crate::error::{Result, TransformError};
use crate::extract::{Answer, derive_fields};
use crate::numbering::PatientNumbering;

/// Column-oriented view of the raw form-response table.
///
/// All cells are text (blank cells are `None`) except the submission
/// timestamp, which is already normalized to UTC.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub patient_ids: Vec<Option<String>>,
    pub encounter_ranks: Vec<Option<String>>,
    pub created_at: Vec<Option<DateTime<Utc>>>,
    pub bundle_names: Vec<Option<String>>,
    pub questions: Vec<Option<String>>,
    pub responses: Vec<Option<String>>,
}

impl RawTable {
    /// Read the required columns out of a DataFrame.
    ///
    /// Fails on the first required column that is absent.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        if let Some(missing) = RawColumn::ALL
            .into_iter()
            .find(|raw| df.column(raw.name()).is_err())
        {
            return Err(TransformError::MissingColumn {
                column: missing.name(),
            });
        }
        let text = |raw: RawColumn| {
            column_text_values(df, raw.name())
                .ok_or(TransformError::MissingColumn { column: raw.name() })
        };
        let created_at = normalize_timestamps(&text(RawColumn::CreatedAt)?);
        Ok(Self {
            patient_ids: text(RawColumn::PatientId)?,
            encounter_ranks: text(RawColumn::EncounterRank)?,
            created_at,
            bundle_names: text(RawColumn::BundleName)?,
            questions: text(RawColumn::QuestionText)?,
            responses: text(RawColumn::ResponseText)?,
        })
    }

    pub fn len(&self) -> usize {
        self.patient_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patient_ids.is_empty()
    }
}

/// Row indices of one (patient identifier, encounter rank) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterGroup {
    pub patient_id: Option<String>,
    pub encounter: Option<String>,
    /// Raw row indices in original order.
    pub rows: Vec<usize>,
}

/// Group rows by (patient identifier, encounter rank) in first-appearance order.
pub fn group_encounters(table: &RawTable) -> Vec<EncounterGroup> {
    let mut groups: Vec<EncounterGroup> = Vec::new();
    let mut index: HashMap<(Option<&str>, Option<&str>), usize> = HashMap::new();
    for row in 0..table.len() {
        let patient_id = table.patient_ids[row].as_deref();
        let encounter = table.encounter_ranks[row].as_deref();
        let slot = *index.entry((patient_id, encounter)).or_insert_with(|| {
            groups.push(EncounterGroup {
                patient_id: patient_id.map(str::to_string),
                encounter: encounter.map(str::to_string),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(row);
    }
    groups
}

/// Reduce one group into an encounter row.
///
/// `days_between_encounter` is left at 0; it is filled in after sorting.
pub fn build_encounter(
    group: &EncounterGroup,
    table: &RawTable,
    numbering: &PatientNumbering,
    questions: &QuestionMap,
) -> EncounterRow {
    let answers: Vec<Answer<'_>> = group
        .rows
        .iter()
        .map(|&row| Answer::new(table.questions[row].as_deref(), table.responses[row].as_deref()))
        .collect();
    let fields = derive_fields(&answers, questions);
    EncounterRow {
        patient_number: group
            .patient_id
            .as_deref()
            .and_then(|id| numbering.get(id)),
        patient_id: group.patient_id.clone(),
        encounter: group.encounter.clone(),
        medication_formulation: group
            .rows
            .first()
            .and_then(|&row| table.bundle_names[row].clone()),
        form_date: group
            .rows
            .iter()
            .filter_map(|&row| table.created_at[row])
            .min(),
        gender: fields.gender,
        weight_lb: fields.weight_lb,
        bmi: fields.bmi,
        weight_change_lb: fields.weight_change_lb,
        dosage_change: fields.dosage_change,
        other_medication_change: fields.other_medication_change,
        height: fields.height,
        days_between_encounter: 0,
    }
}

/// Build one encounter row per group, in group order.
pub fn aggregate_encounters(
    table: &RawTable,
    numbering: &PatientNumbering,
    questions: &QuestionMap,
) -> Vec<EncounterRow> {
    let groups = group_encounters(table);
    debug!(
        row_count = table.len(),
        encounter_count = groups.len(),
        "grouped answers into encounters"
    );
    let rows: Vec<EncounterRow> = groups
        .iter()
        .map(|group| build_encounter(group, table, numbering, questions))
        .collect();

    let undated = rows.iter().filter(|row| row.form_date.is_none()).count();
    if undated > 0 {
        warn!(undated, "encounters without a valid submission timestamp");
    }
    let unnumbered = rows.iter().filter(|row| row.patient_number.is_none()).count();
    if unnumbered > 0 {
        warn!(unnumbered, "encounters without a patient identifier");
    }
    let dosage_requests = rows
        .iter()
        .filter(|row| row.dosage_change == ChangeFlag::Yes)
        .count();
    debug!(dosage_requests, "dosage change requests");
    rows
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn text(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    fn table() -> RawTable {
        RawTable {
            patient_ids: text(&[Some("p1"), Some("p2"), Some("p1"), Some("p1"), None]),
            encounter_ranks: text(&[Some("1"), Some("1"), Some("2"), Some("1"), Some("1")]),
            created_at: vec![
                Some(Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap()),
                None,
                Some(Utc.with_ymd_and_hms(2024, 2, 5, 9, 0, 0).unwrap()),
                Some(Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap()),
                None,
            ],
            bundle_names: text(&[Some("Sema"), Some("Tirz"), Some("Sema"), Some("Other"), None]),
            questions: text(&[
                Some("Your BMI is"),
                Some("Your BMI is"),
                Some("Your BMI is"),
                Some("Your BMI is"),
                Some("Your BMI is"),
            ]),
            responses: text(&[Some("27"), Some("31"), Some("26.5"), Some("99"), None]),
        }
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let groups = group_encounters(&table());
        let keys: Vec<(Option<&str>, Option<&str>)> = groups
            .iter()
            .map(|g| (g.patient_id.as_deref(), g.encounter.as_deref()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (Some("p1"), Some("1")),
                (Some("p2"), Some("1")),
                (Some("p1"), Some("2")),
                (None, Some("1")),
            ]
        );
        assert_eq!(groups[0].rows, vec![0, 3]);
    }

    #[test]
    fn test_build_encounter_takes_earliest_date_and_first_bundle() {
        let table = table();
        let numbering = PatientNumbering::from_ids(&table.patient_ids);
        let groups = group_encounters(&table);
        let row = build_encounter(&groups[0], &table, &numbering, &QuestionMap::default());
        assert_eq!(row.patient_number, Some(1));
        assert_eq!(row.medication_formulation.as_deref(), Some("Sema"));
        assert_eq!(
            row.form_date,
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap())
        );
        assert_eq!(row.bmi, Some(27.0));
    }

    #[test]
    fn test_group_without_dates_or_patient_still_produces_row() {
        let table = table();
        let numbering = PatientNumbering::from_ids(&table.patient_ids);
        let rows = aggregate_encounters(&table, &numbering, &QuestionMap::default());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].form_date, None);
        assert_eq!(rows[3].patient_number, None);
        assert_eq!(rows[3].patient_id, None);
        assert_eq!(rows[3].bmi, None);
    }
}
