//! Cross-cutting error types for orgmatch.
//!
//! Crate-specific failures (`DirectoryError`, `DatabaseError`, `ConfigError`)
//! live in their own crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors raised while parsing core domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lead origin string did not match any known lead table.
    #[error("Unknown lead origin: {0} (expected inbound, event or import)")]
    UnknownOrigin(String),
}
