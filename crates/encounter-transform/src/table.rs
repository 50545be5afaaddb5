//! The transform's output table.

use std::collections::BTreeSet;

use encounter_model::EncounterRow;

/// The sorted encounter rows produced by one transform run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncounterTable {
    pub rows: Vec<EncounterRow>,
}

impl EncounterTable {
    pub fn new(rows: Vec<EncounterRow>) -> Self {
        Self { rows }
    }

    /// Returns the number of encounters.
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct patients (distinct non-null patient numbers).
    pub fn patient_count(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.patient_number)
            .collect::<BTreeSet<u32>>()
            .len()
    }
}
