//! Encounter transformation.
//!
//! Turns a raw form-response table (one row per answered question) into one
//! row per patient encounter:
//!
//! - **datetime**: submission timestamp normalization to UTC
//! - **numbering**: run-local sequential patient numbers
//! - **extract**: first-match question lookup and field derivations
//! - **aggregate**: grouping by (patient, encounter rank) and row assembly
//! - **interval**: encounter ordering and days since the previous encounter
//! - **pipeline**: the end-to-end transform
//! - **table**: the resulting encounter table

pub mod aggregate;
pub mod datetime;
pub mod error;
pub mod extract;
pub mod interval;
pub mod numbering;
pub mod pipeline;
pub mod table;

pub use error::{Result, TransformError};
pub use numbering::PatientNumbering;
pub use pipeline::process_encounter_data;
pub use table::EncounterTable;
