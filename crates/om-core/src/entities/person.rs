use serde::{Deserialize, Serialize};

/// A person at a resolved organization matching the decision-maker filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionMaker {
    pub external_id: String,
    pub name: String,
    pub title: Option<String>,
    pub seniority: Option<String>,
    pub linkedin_url: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}
