//! Question lookup and per-field derivation rules.
//!
//! Each encounter is a list of answered questions. A field takes the
//! response of the *first* answer whose question text is one of the field's
//! accepted texts; later answers to the same question are ignored.

use encounter_common::parse_f64;
use encounter_model::{ChangeFlag, QuestionField, QuestionMap};

/// One answered question within an encounter, in original row order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Answer<'a> {
    pub question: Option<&'a str>,
    pub response: Option<&'a str>,
}

impl<'a> Answer<'a> {
    pub fn new(question: Option<&'a str>, response: Option<&'a str>) -> Self {
        Self { question, response }
    }
}

/// Derived clinical fields of one encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFields {
    pub gender: Option<String>,
    pub weight_lb: Option<f64>,
    pub bmi: Option<f64>,
    pub weight_change_lb: Option<f64>,
    pub dosage_change: ChangeFlag,
    pub other_medication_change: ChangeFlag,
    pub height: Option<String>,
}

/// Response of the first answer matching `field`, or `None`.
///
/// A matching answer with an empty response still wins over later matches.
pub fn first_response<'a>(
    answers: &[Answer<'a>],
    questions: &QuestionMap,
    field: QuestionField,
) -> Option<&'a str> {
    answers
        .iter()
        .find(|answer| {
            answer
                .question
                .is_some_and(|question| questions.matches(field, question))
        })
        .and_then(|answer| answer.response)
}

/// Best-effort numeric coercion; anything non-numeric is `None`.
pub fn coerce_numeric(value: Option<&str>) -> Option<f64> {
    value.and_then(parse_f64)
}

/// Weight from the primary question, falling back when it is missing or empty.
///
/// Any other primary answer, even a blank or non-numeric one, does not fall
/// back; it coerces to `None`.
pub fn weight_lb(primary: Option<&str>, fallback: Option<&str>) -> Option<f64> {
    let raw = primary.filter(|value| !value.is_empty()).or(fallback);
    coerce_numeric(raw)
}

/// `No` for a missing/empty answer or a literal "no", `Yes` for anything else.
pub fn dosage_change_flag(value: Option<&str>) -> ChangeFlag {
    match value {
        Some(text) if !text.is_empty() && !text.eq_ignore_ascii_case("no") => ChangeFlag::Yes,
        _ => ChangeFlag::No,
    }
}

/// `Yes` only for a literal "yes".
pub fn other_medication_flag(value: Option<&str>) -> ChangeFlag {
    match value {
        Some(text) if text.eq_ignore_ascii_case("yes") => ChangeFlag::Yes,
        _ => ChangeFlag::No,
    }
}

/// Compose `{feet}'{inches}"` when both parts are present, otherwise use the
/// free-text height answer.
///
/// # Examples
///
/// ```
/// use encounter_transform::extract::height;
///
/// assert_eq!(height(Some("5"), Some("6"), None).as_deref(), Some("5'6\""));
/// assert_eq!(height(Some("5"), None, Some("5 ft 6")).as_deref(), Some("5 ft 6"));
/// assert_eq!(height(None, Some("6"), None), None);
/// ```
pub fn height(feet: Option<&str>, inches: Option<&str>, text: Option<&str>) -> Option<String> {
    match (feet, inches) {
        (Some(feet), Some(inches)) => Some(format!("{feet}'{inches}\"")),
        _ => text.map(str::to_string),
    }
}

/// Apply every field rule to one encounter's answers.
pub fn derive_fields(answers: &[Answer<'_>], questions: &QuestionMap) -> DerivedFields {
    let lookup = |field| first_response(answers, questions, field);
    DerivedFields {
        gender: lookup(QuestionField::Gender).map(str::to_string),
        weight_lb: weight_lb(
            lookup(QuestionField::WeightPrimary),
            lookup(QuestionField::WeightFallback),
        ),
        bmi: coerce_numeric(lookup(QuestionField::Bmi)),
        weight_change_lb: coerce_numeric(lookup(QuestionField::WeightChange)),
        dosage_change: dosage_change_flag(lookup(QuestionField::DosageChange)),
        other_medication_change: other_medication_flag(lookup(QuestionField::OtherMedsChange)),
        height: height(
            lookup(QuestionField::HeightFeet),
            lookup(QuestionField::HeightInches),
            lookup(QuestionField::HeightText),
        ),
    }
}
