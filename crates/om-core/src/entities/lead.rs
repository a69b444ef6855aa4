use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Candidate, DecisionMaker, OrganizationRecord};
use crate::enums::{Origin, ResolutionStatus};

/// The two semantic fields the resolution engine reads from any lead table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub origin: Origin,
    pub lead_id: String,
    pub contact_email: Option<String>,
    pub company_name: Option<String>,
}

/// Persisted resolution state of one lead, as written back by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadResolution {
    pub origin: Origin,
    pub lead_id: String,
    /// `None` until the lead has been resolved at least once.
    pub status: Option<ResolutionStatus>,
    pub error_message: Option<String>,
    pub email_domain: Option<String>,
    pub organization_id: Option<String>,
    pub organization: Option<OrganizationRecord>,
    pub people: Vec<DecisionMaker>,
    pub candidates: Vec<Candidate>,
    pub last_enriched_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
