use serde::{Deserialize, Serialize};

use crate::limits::{MAX_DESCRIPTION_CHARS, MAX_LIST_ITEMS, truncate_chars};

/// Canonical organization as known to the business directory.
///
/// Produced by a domain enrichment call, or synthesized from a name-search
/// [`Candidate`] when enrichment is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub external_id: String,
    pub name: String,
    pub primary_domain: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<u64>,
    pub annual_revenue: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub linkedin_url: Option<String>,
    pub short_description: Option<String>,
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl OrganizationRecord {
    /// Build a record directly from a search candidate's own fields.
    ///
    /// Fields a candidate does not carry (revenue, description, keywords,
    /// technologies) stay empty.
    #[must_use]
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            external_id: candidate.external_id.clone(),
            name: candidate.name.clone(),
            primary_domain: candidate.primary_domain.clone(),
            industry: candidate.industry.clone(),
            employee_count: candidate.employee_count,
            annual_revenue: None,
            city: candidate.city.clone(),
            state: candidate.state.clone(),
            country: candidate.country.clone(),
            linkedin_url: candidate.linkedin_url.clone(),
            short_description: None,
            founded_year: candidate.founded_year,
            keywords: Vec::new(),
            technologies: Vec::new(),
        }
    }

    /// Apply the payload limits: list attributes are cut to
    /// [`MAX_LIST_ITEMS`] and the description to [`MAX_DESCRIPTION_CHARS`].
    #[must_use]
    pub fn bounded(mut self) -> Self {
        self.keywords.truncate(MAX_LIST_ITEMS);
        self.technologies.truncate(MAX_LIST_ITEMS);
        self.short_description = self
            .short_description
            .map(|d| truncate_chars(&d, MAX_DESCRIPTION_CHARS));
        self
    }
}

/// Lightweight organization summary returned by a name search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub external_id: String,
    pub name: String,
    pub primary_domain: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<u64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub linkedin_url: Option<String>,
    pub founded_year: Option<i32>,
}
