//! Shared test utilities for om-db tests.

use om_core::entities::{Candidate, DecisionMaker, OrganizationRecord};

use crate::LeadStore;

/// In-memory store with migrations applied.
pub async fn test_store() -> LeadStore {
    LeadStore::open_local(":memory:").await.unwrap()
}

pub fn organization(id: &str, name: &str) -> OrganizationRecord {
    OrganizationRecord {
        external_id: id.to_string(),
        name: name.to_string(),
        primary_domain: Some("acme.com".to_string()),
        industry: Some("machinery".to_string()),
        employee_count: Some(250),
        ..OrganizationRecord::default()
    }
}

pub fn candidate(id: &str, name: &str) -> Candidate {
    Candidate {
        external_id: id.to_string(),
        name: name.to_string(),
        ..Candidate::default()
    }
}

pub fn person(name: &str, title: &str) -> DecisionMaker {
    DecisionMaker {
        external_id: format!("p-{name}"),
        name: name.to_string(),
        title: Some(title.to_string()),
        ..DecisionMaker::default()
    }
}
