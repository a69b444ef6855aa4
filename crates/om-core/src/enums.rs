//! Status and origin enums for orgmatch.
//!
//! All enums use `snake_case` serialization, matching the text stored in the
//! lead tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ResolutionStatus
// ---------------------------------------------------------------------------

/// Status of a lead's organization resolution.
///
/// ```text
/// running → ok
///         → needs_review
///         → error
/// ok | needs_review | error → running   (explicit re-resolution)
/// running → running                     (re-trigger of a stale run)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Running,
    Ok,
    NeedsReview,
    Error,
}

impl ResolutionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Running => &[Self::Ok, Self::NeedsReview, Self::Error, Self::Running],
            Self::Ok | Self::NeedsReview | Self::Error => &[Self::Running],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Ok => "ok",
            Self::NeedsReview => "needs_review",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

/// Where a lead came from. Each origin is stored in its own table with its own
/// column names; the store maps an origin to its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Website contact and demo-request forms.
    Inbound,
    /// Trade show and webinar registrations.
    Event,
    /// Bulk spreadsheet imports.
    Import,
}

impl Origin {
    pub const ALL: [Self; 3] = [Self::Inbound, Self::Event, Self::Import];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Event => "event",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|origin| origin.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownOrigin(s.to_string()))
    }
}
