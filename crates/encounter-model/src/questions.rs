//! Question texts that identify each logical field of an encounter.
//!
//! A form submission is a bag of (question, answer) rows. Each derived field
//! is looked up by exact question text; a field may accept several wordings
//! so that revised forms keep mapping onto the same column.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Logical fields extracted from a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionField {
    Gender,
    WeightPrimary,
    WeightFallback,
    Bmi,
    WeightChange,
    DosageChange,
    OtherMedsChange,
    HeightFeet,
    HeightInches,
    HeightText,
}

impl QuestionField {
    pub const ALL: [QuestionField; 10] = [
        QuestionField::Gender,
        QuestionField::WeightPrimary,
        QuestionField::WeightFallback,
        QuestionField::Bmi,
        QuestionField::WeightChange,
        QuestionField::DosageChange,
        QuestionField::OtherMedsChange,
        QuestionField::HeightFeet,
        QuestionField::HeightInches,
        QuestionField::HeightText,
    ];

    /// Key used for this field in question map files.
    pub fn key(self) -> &'static str {
        match self {
            QuestionField::Gender => "gender",
            QuestionField::WeightPrimary => "weight_primary",
            QuestionField::WeightFallback => "weight_fallback",
            QuestionField::Bmi => "bmi",
            QuestionField::WeightChange => "weight_change",
            QuestionField::DosageChange => "dosage_change",
            QuestionField::OtherMedsChange => "other_meds_change",
            QuestionField::HeightFeet => "height_feet",
            QuestionField::HeightInches => "height_inches",
            QuestionField::HeightText => "height_text",
        }
    }
}

/// Accepted question texts per logical field.
///
/// Missing keys in a question map file keep their default wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuestionMap {
    pub gender: Vec<String>,
    pub weight_primary: Vec<String>,
    pub weight_fallback: Vec<String>,
    pub bmi: Vec<String>,
    pub weight_change: Vec<String>,
    pub dosage_change: Vec<String>,
    pub other_meds_change: Vec<String>,
    pub height_feet: Vec<String>,
    pub height_inches: Vec<String>,
    pub height_text: Vec<String>,
}

impl Default for QuestionMap {
    fn default() -> Self {
        fn texts(text: &str) -> Vec<String> {
            vec![text.to_string()]
        }
        Self {
            gender: texts("What was your sex assigned at birth?"),
            weight_primary: texts("What is your current weight (lbs)?"),
            weight_fallback: texts("What is your weight in pounds?"),
            bmi: texts("Your BMI is"),
            weight_change: texts("How much weight have you lost in the past month?"),
            dosage_change: texts("Do you have any requests regarding your medication dosage?"),
            other_meds_change: texts(
                "Are you taking any new prescription medications, over-the-counter medications, \
                 or supplements you have started taking since last month?",
            ),
            height_feet: texts("Height (Feet)"),
            height_inches: texts("Height (Inches)"),
            height_text: texts("What is your height in feet and inches?"),
        }
    }
}

impl QuestionMap {
    /// Accepted question texts for a field.
    pub fn texts(&self, field: QuestionField) -> &[String] {
        match field {
            QuestionField::Gender => &self.gender,
            QuestionField::WeightPrimary => &self.weight_primary,
            QuestionField::WeightFallback => &self.weight_fallback,
            QuestionField::Bmi => &self.bmi,
            QuestionField::WeightChange => &self.weight_change,
            QuestionField::DosageChange => &self.dosage_change,
            QuestionField::OtherMedsChange => &self.other_meds_change,
            QuestionField::HeightFeet => &self.height_feet,
            QuestionField::HeightInches => &self.height_inches,
            QuestionField::HeightText => &self.height_text,
        }
    }

    /// Exact (case- and whitespace-sensitive) match of a question text.
    pub fn matches(&self, field: QuestionField, question: &str) -> bool {
        self.texts(field).iter().any(|text| text == question)
    }
}

/// Load a question map from a JSON file.
pub fn load_question_map(path: &Path) -> Result<QuestionMap> {
    let contents = fs::read_to_string(path).map_err(|source| ModelError::QuestionMapRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ModelError::QuestionMapParse {
        path: path.to_path_buf(),
        source,
    })
}
