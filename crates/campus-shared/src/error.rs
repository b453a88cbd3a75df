//! Error types for the shared pipeline stages.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Invalid classifier tuning: {0}")]
    InvalidTuning(String),

    #[error("Knowledge entry has an empty key")]
    EmptyKnowledgeKey,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
