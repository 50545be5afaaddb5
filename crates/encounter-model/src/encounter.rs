//! The encounter row produced for each (patient, encounter rank) pair.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Yes/No answer derived from a free-text response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeFlag {
    Yes,
    No,
}

impl ChangeFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFlag::Yes => "Yes",
            ChangeFlag::No => "No",
        }
    }
}

impl fmt::Display for ChangeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One patient encounter, flattened from the question/answer rows of a form.
///
/// Field order matches the exported column order; the serde renames are the
/// literal CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterRow {
    /// Run-local sequence number; absent when the patient identifier is null.
    #[serde(rename = "Patient Number")]
    pub patient_number: Option<u32>,
    #[serde(rename = "Patient ID")]
    pub patient_id: Option<String>,
    /// Encounter rank, passed through as text.
    #[serde(rename = "Encounter")]
    pub encounter: Option<String>,
    #[serde(rename = "Medication formulation")]
    pub medication_formulation: Option<String>,
    /// Earliest valid submission timestamp of the encounter.
    #[serde(
        rename = "Date on which form was filled",
        serialize_with = "serialize_form_date"
    )]
    pub form_date: Option<DateTime<Utc>>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Weight in lb")]
    pub weight_lb: Option<f64>,
    #[serde(rename = "BMI")]
    pub bmi: Option<f64>,
    #[serde(rename = "Change in weight (lbs)")]
    pub weight_change_lb: Option<f64>,
    #[serde(rename = "Dosage change of Rx")]
    pub dosage_change: ChangeFlag,
    #[serde(rename = "Change in other medications")]
    pub other_medication_change: ChangeFlag,
    #[serde(rename = "Height")]
    pub height: Option<String>,
    #[serde(rename = "Days between encounter")]
    pub days_between_encounter: i64,
}

/// Render a form date the way the exported table shows it
/// (`2024-01-05 10:00:00+00:00`).
pub fn format_form_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S%:z").to_string()
}

fn serialize_form_date<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&format_form_date(date)),
        None => serializer.serialize_none(),
    }
}
