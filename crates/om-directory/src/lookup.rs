//! Tagged results of directory operations.

use std::fmt;

use crate::error::DirectoryError;

/// Why a directory operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Still rate limited after the retry budget. Try later.
    RateLimited,
    /// Timeout, transport failure or server error.
    Unavailable,
    /// The response could not be decoded.
    Malformed,
    /// The caller cancelled the operation.
    Cancelled,
}

impl FailureKind {
    /// Failures worth another attempt after a short delay.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// A failed directory operation with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl DirectoryFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DirectoryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of one directory operation.
///
/// `NotFound` is a normal "no match" answer, not an error. Rate limiting only
/// shows up once [`crate::DirectoryClient`] has spent its retry budget, as a
/// `Failure` with [`FailureKind::RateLimited`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Success(T),
    NotFound,
    Failure(DirectoryFailure),
}

impl<T> Lookup<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Success(value) => Lookup::Success(f(value)),
            Self::NotFound => Lookup::NotFound,
            Self::Failure(failure) => Lookup::Failure(failure),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl<T> From<Result<T, DirectoryError>> for Lookup<T> {
    fn from(result: Result<T, DirectoryError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(DirectoryError::NotFound { .. }) => Self::NotFound,
            Err(DirectoryError::RateLimited { .. }) => Self::Failure(DirectoryFailure::new(
                FailureKind::RateLimited,
                "rate limited by directory service; try again later",
            )),
            Err(DirectoryError::Cancelled) => Self::Failure(DirectoryFailure::new(
                FailureKind::Cancelled,
                "directory call cancelled",
            )),
            Err(e @ DirectoryError::Parse(_)) => Self::Failure(DirectoryFailure::new(
                FailureKind::Malformed,
                format!("directory returned an unreadable response: {e}"),
            )),
            Err(
                e @ (DirectoryError::Http(_)
                | DirectoryError::Api { .. }
                | DirectoryError::Timeout { .. }),
            ) => Self::Failure(DirectoryFailure::new(
                FailureKind::Unavailable,
                format!("directory service unreachable: {e}"),
            )),
        }
    }
}
