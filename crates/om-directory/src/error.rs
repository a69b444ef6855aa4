//! Directory error types.

use thiserror::Error;

/// Errors from a single attempt against the directory API.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP transport error (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The directory answered with a server error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the directory.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The directory has no record for the request (404 or any other 4xx,
    /// or an empty organization payload).
    #[error("not found (status {status})")]
    NotFound {
        /// HTTP status code returned by the directory.
        status: u16,
    },

    /// Failed to parse a directory response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The directory returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the directory asked us to wait.
        retry_after_secs: u64,
    },

    /// The call exceeded its time budget.
    #[error("timed out after {secs}s")]
    Timeout {
        /// The per-call budget that elapsed.
        secs: u64,
    },

    /// The caller cancelled the call.
    #[error("cancelled")]
    Cancelled,
}
