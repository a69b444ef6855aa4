//! Database error types for om-db.

use thiserror::Error;

/// Errors from lead store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unreadable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The lead does not exist in its origin table.
    #[error("Lead not found: {origin} {lead_id}")]
    LeadNotFound { origin: String, lead_id: String },

    /// Invalid state encountered (e.g., a disallowed status transition).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
