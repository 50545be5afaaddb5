use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read question map {path}: {source}")]
    QuestionMapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid question map {path}: {source}")]
    QuestionMapParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
