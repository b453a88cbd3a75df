//! Error types for the data tiers and the agent boundary.

use campus_shared::CampusError;
use thiserror::Error;

/// Live data-access failures. Any of these triggers the fixture tier.
#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("{0} reported success=false")]
    Unsuccessful(String),

    #[error("Malformed response from {path}: {reason}")]
    MalformedBody { path: String, reason: String },

    #[error("Live data access is disabled (offline mode)")]
    Offline,
}

/// Fixture-tier failures. Only these make an action fail outright.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("No fixture data for path: {0}")]
    UnknownPath(String),

    #[error("Fixture data unavailable: {0}")]
    Unavailable(String),
}

/// Failures at the `process_message` boundary and while assembling an agent
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Message is {len} characters, the limit is {max}")]
    MessageTooLong { len: usize, max: usize },

    #[error("Pipeline panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    Campus(#[from] CampusError),

    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}

impl AgentError {
    /// Wording shown to the end user. Never carries internal detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MessageTooLong { .. } => {
                "That message is a bit long for me. Could you shorten it and ask again?"
            }
            Self::Panicked(_) | Self::Campus(_) | Self::DataAccess(_) => {
                campus_shared::dialogue::PIPELINE_APOLOGY
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_detail() {
        let err = AgentError::Panicked("index out of bounds at src/render.rs:42".to_string());
        assert!(!err.user_message().contains("render.rs"));
        assert!(err.to_string().contains("render.rs"));

        let err = AgentError::MessageTooLong { len: 5000, max: 2000 };
        assert!(!err.user_message().contains("5000"));
        assert_eq!(err.to_string(), "Message is 5000 characters, the limit is 2000");
    }
}
