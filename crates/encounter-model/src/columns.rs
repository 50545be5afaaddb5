//! Column names of the raw form-response table and the encounter table.

/// Required columns of a raw form-response table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawColumn {
    PatientId,
    EncounterRank,
    CreatedAt,
    BundleName,
    QuestionText,
    ResponseText,
}

impl RawColumn {
    /// All required columns, in the order they are validated.
    pub const ALL: [RawColumn; 6] = [
        RawColumn::PatientId,
        RawColumn::EncounterRank,
        RawColumn::CreatedAt,
        RawColumn::BundleName,
        RawColumn::QuestionText,
        RawColumn::ResponseText,
    ];

    /// Literal header name in the uploaded table.
    pub fn name(self) -> &'static str {
        match self {
            RawColumn::PatientId => "patient_user_id",
            RawColumn::EncounterRank => "form_response_rank",
            RawColumn::CreatedAt => "response_created_at",
            RawColumn::BundleName => "product_bundle_name",
            RawColumn::QuestionText => "question_text",
            RawColumn::ResponseText => "question_response_text",
        }
    }
}

/// Headers of the encounter table, in output order.
pub const OUTPUT_COLUMNS: [&str; 13] = [
    "Patient Number",
    "Patient ID",
    "Encounter",
    "Medication formulation",
    "Date on which form was filled",
    "Gender",
    "Weight in lb",
    "BMI",
    "Change in weight (lbs)",
    "Dosage change of Rx",
    "Change in other medications",
    "Height",
    "Days between encounter",
];
