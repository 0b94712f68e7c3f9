use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the scoring engine and its reference-data loader.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to read reference data from {}", path.display())]
    MissingReferenceData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference data in {}", path.display())]
    MalformedReferenceData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("reference table '{table}' is invalid: {reason}")]
    InvalidReferenceData { table: &'static str, reason: String },

    #[error("failed to read batch input: {0}")]
    Csv(#[from] csv::Error),
}

impl AdvisorError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AdvisorError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
