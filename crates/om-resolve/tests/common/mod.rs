//! Scripted directory and store fixtures shared by the resolution tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use om_config::ResolutionConfig;
use om_core::entities::{Candidate, DecisionMaker, OrganizationRecord};
use om_core::enums::Origin;
use om_db::LeadStore;
use om_directory::{
    DirectoryApi, DirectoryClient, DirectoryError, OrganizationQuery, PeopleQuery, RetryPolicy,
};
use om_resolve::Resolver;

/// Scripted reply for one directory operation.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Found(T),
    FoundAfter(Duration, T),
    NotFound,
    RateLimited,
    ServerError,
    Hang,
}

impl<T: Clone> Reply<T> {
    async fn play(&self) -> Result<T, DirectoryError> {
        match self {
            Self::Found(value) => Ok(value.clone()),
            Self::FoundAfter(delay, value) => {
                tokio::time::sleep(*delay).await;
                Ok(value.clone())
            }
            Self::NotFound => Err(DirectoryError::NotFound { status: 404 }),
            Self::RateLimited => Err(DirectoryError::RateLimited {
                retry_after_secs: 1,
            }),
            Self::ServerError => Err(DirectoryError::Api {
                status: 503,
                message: "unavailable".into(),
            }),
            Self::Hang => {
                tokio::time::sleep(Duration::from_secs(3_600)).await;
                Err(DirectoryError::Timeout { secs: 3_600 })
            }
        }
    }
}

/// Directory stub with per-operation replies and call counters.
pub struct StubDirectory {
    enrich: HashMap<String, Reply<OrganizationRecord>>,
    search: Reply<Vec<Candidate>>,
    people: Reply<Vec<DecisionMaker>>,
    pub enrich_calls: AtomicU32,
    pub search_calls: AtomicU32,
    pub people_calls: AtomicU32,
    pub enriched_domains: Mutex<Vec<String>>,
}

impl Default for StubDirectory {
    fn default() -> Self {
        Self {
            enrich: HashMap::new(),
            search: Reply::Found(Vec::new()),
            people: Reply::Found(Vec::new()),
            enrich_calls: AtomicU32::new(0),
            search_calls: AtomicU32::new(0),
            people_calls: AtomicU32::new(0),
            enriched_domains: Mutex::new(Vec::new()),
        }
    }
}

impl StubDirectory {
    pub fn enrich(mut self, domain: &str, reply: Reply<OrganizationRecord>) -> Self {
        self.enrich.insert(domain.to_string(), reply);
        self
    }

    pub fn search(mut self, reply: Reply<Vec<Candidate>>) -> Self {
        self.search = reply;
        self
    }

    pub fn people(mut self, reply: Reply<Vec<DecisionMaker>>) -> Self {
        self.people = reply;
        self
    }

    pub fn enrich_calls(&self) -> u32 {
        self.enrich_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> u32 {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn people_calls(&self) -> u32 {
        self.people_calls.load(Ordering::SeqCst)
    }

    pub fn enriched_domains(&self) -> Vec<String> {
        self.enriched_domains.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryApi for StubDirectory {
    async fn enrich_organization(&self, domain: &str) -> Result<OrganizationRecord, DirectoryError> {
        self.enrich_calls.fetch_add(1, Ordering::SeqCst);
        self.enriched_domains
            .lock()
            .unwrap()
            .push(domain.to_string());
        let reply = self.enrich.get(domain).cloned().unwrap_or(Reply::NotFound);
        reply.play().await
    }

    async fn search_organizations(
        &self,
        _query: &OrganizationQuery<'_>,
    ) -> Result<Vec<Candidate>, DirectoryError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.search.play().await
    }

    async fn search_people(
        &self,
        _query: &PeopleQuery<'_>,
    ) -> Result<Vec<DecisionMaker>, DirectoryError> {
        self.people_calls.fetch_add(1, Ordering::SeqCst);
        self.people.play().await
    }
}

/// Retry policy with the production retry counts and no waiting.
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        call_timeout: Duration::from_secs(5),
        rate_limit_backoff: Duration::ZERO,
        rate_limit_retries: 1,
        transient_backoff: Duration::ZERO,
        transient_retries: 1,
    }
}

pub fn resolver(stub: StubDirectory) -> Resolver<StubDirectory> {
    resolver_with(stub, &ResolutionConfig::default())
}

pub fn resolver_with(stub: StubDirectory, config: &ResolutionConfig) -> Resolver<StubDirectory> {
    Resolver::new(DirectoryClient::new(stub, fast_policy()), config)
}

pub async fn store() -> LeadStore {
    LeadStore::open_local(":memory:").await.unwrap()
}

pub async fn seed(store: &LeadStore, email: Option<&str>, company: Option<&str>) -> String {
    store
        .insert_lead(Origin::Inbound, email, company)
        .await
        .unwrap()
}

pub fn organization(id: &str, name: &str, domain: &str) -> OrganizationRecord {
    OrganizationRecord {
        external_id: id.to_string(),
        name: name.to_string(),
        primary_domain: Some(domain.to_string()),
        industry: Some("software".to_string()),
        employee_count: Some(420),
        keywords: vec!["b2b".to_string(), "saas".to_string()],
        ..OrganizationRecord::default()
    }
}

pub fn candidate(id: &str, name: &str, domain: Option<&str>) -> Candidate {
    Candidate {
        external_id: id.to_string(),
        name: name.to_string(),
        primary_domain: domain.map(String::from),
        country: Some("Spain".to_string()),
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
