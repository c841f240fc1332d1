//! Unified error types for evoplan

use thiserror::Error;

/// Unified error type for all evoplan operations
///
/// All three remote-call failure classes are fatal to the current run:
/// nothing is retried and nothing is converted into partial output.
#[derive(Error, Debug)]
pub enum EvoplanError {
    // Completion client errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // Pre-dispatch validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using EvoplanError
pub type Result<T> = std::result::Result<T, EvoplanError>;
