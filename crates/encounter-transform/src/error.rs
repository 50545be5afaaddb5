//! Error types for the encounter transform.

use thiserror::Error;

/// Structural faults in the input table.
///
/// Malformed cell values never produce an error; they are coerced to null.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required raw column is absent.
    #[error("required column '{column}' not found in input table")]
    MissingColumn { column: &'static str },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
