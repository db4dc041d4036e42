//! Error types for review service operations

use thiserror::Error;

/// Result type for review service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the review service
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failure
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The service answered with a non-success status
    ///
    /// `message` carries the server-supplied reason when one was sent,
    /// otherwise the HTTP status text.
    #[error("Review service error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-supplied message, or the status text
        message: String,
    },

    /// Review not found
    #[error("Review {0} not found")]
    ReviewNotFound(String),

    /// Local validation or session failure from the core crate
    #[error(transparent)]
    Core(#[from] bookrev_core::Error),

    /// IO error (reading an image file for upload)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}
