//! Error types for efiling-client
//!
//! This module provides error handling for the library, including:
//! - Transport failures from the vendor endpoint
//! - Decode failures in the filing result (base64 report, filing date)
//! - Configuration and session-store errors
//!
//! Server-reported dispositions (rejection, job failure, poll timeout) are
//! not errors; they are classified terminations carried in
//! [`WorkflowReport`](crate::workflow::WorkflowReport).

use thiserror::Error;

/// Result type alias for efiling-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for efiling-client
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Network or HTTP-level failure talking to the vendor endpoint
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The submit response carried data the client cannot interpret
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The validation report in the filing result is not valid base64
    #[error("invalid base64 in validation content: {0}")]
    ValidationDecode(#[from] base64::DecodeError),

    /// The filing date in the filing result does not match the wire format
    #[error("invalid filing date '{value}': {source}")]
    FilingDate {
        /// The raw date text as received from the server
        value: String,
        /// The underlying chrono parse failure
        #[source]
        source: chrono::ParseError,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
