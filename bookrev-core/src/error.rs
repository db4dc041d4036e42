//! Error types for bookrev

use thiserror::Error;

/// Result type alias for bookrev operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for bookrev operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A review field failed local validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown review status value
    #[error("Invalid review status: {0:?} (expected pending, added or rejected)")]
    InvalidStatus(String),

    /// Status change not permitted by the moderation state machine
    #[error("Cannot change review status from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: crate::review::ReviewStatus,
        /// Requested status
        to: crate::review::ReviewStatus,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
