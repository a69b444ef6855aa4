//! Result of resolving one lead.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{Candidate, DecisionMaker, OrganizationRecord};
use crate::enums::ResolutionStatus;

/// Why a resolution ended in `error`.
///
/// Only the message is persisted; the kind is returned to the caller so it can
/// tell "try later" apart from "nothing to find".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionErrorKind {
    /// Neither a usable email domain nor a company name.
    Input,
    /// The directory had no match for the domain or name.
    NotFound,
    /// The directory kept rate limiting after the retry budget.
    RateLimited,
    /// Timeout, network failure, server error or malformed payload.
    Unavailable,
    /// The lead store could not be read or written.
    Store,
    /// The caller cancelled the resolution.
    Cancelled,
}

impl ResolutionErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
            Self::Store => "store",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// A clear match. `people` holds best-effort decision-makers, possibly empty.
    Ok {
        organization: OrganizationRecord,
        people: Vec<DecisionMaker>,
    },
    /// Several plausible organizations; deferred to a human.
    NeedsReview { candidates: Vec<Candidate> },
    Error {
        kind: ResolutionErrorKind,
        message: String,
    },
}

impl ResolutionOutcome {
    pub fn error(kind: ResolutionErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    /// Terminal status this outcome is persisted as.
    #[must_use]
    pub const fn status(&self) -> ResolutionStatus {
        match self {
            Self::Ok { .. } => ResolutionStatus::Ok,
            Self::NeedsReview { .. } => ResolutionStatus::NeedsReview,
            Self::Error { .. } => ResolutionStatus::Error,
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    #[must_use]
    pub const fn error_kind(&self) -> Option<ResolutionErrorKind> {
        match self {
            Self::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
