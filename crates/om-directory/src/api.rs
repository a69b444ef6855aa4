//! Raw directory API: one HTTP request per call, no retries.
//!
//! [`DirectoryApi`] is the seam between the retrying [`crate::DirectoryClient`]
//! and the wire. [`HttpDirectoryApi`] is the production implementation; tests
//! substitute stubs.

use async_trait::async_trait;

use om_config::DirectoryConfig;
use om_core::entities::{Candidate, DecisionMaker, OrganizationRecord};

use crate::error::DirectoryError;

/// Parameters of an organization name search.
#[derive(Debug, Clone, Copy)]
pub struct OrganizationQuery<'a> {
    pub name: &'a str,
    pub region: Option<&'a str>,
    pub per_page: u32,
}

/// Parameters of a decision-maker search within one organization.
#[derive(Debug, Clone, Copy)]
pub struct PeopleQuery<'a> {
    pub organization_id: &'a str,
    pub titles: &'a [String],
    pub region: Option<&'a str>,
    pub per_page: u32,
}

/// Single-attempt access to the three directory operations.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Enrich an organization by its web domain.
    async fn enrich_organization(&self, domain: &str)
    -> Result<OrganizationRecord, DirectoryError>;

    /// Search organizations by free-text name. Order is the directory's.
    async fn search_organizations(
        &self,
        query: &OrganizationQuery<'_>,
    ) -> Result<Vec<Candidate>, DirectoryError>;

    /// Search people at an organization matching a title filter.
    async fn search_people(
        &self,
        query: &PeopleQuery<'_>,
    ) -> Result<Vec<DecisionMaker>, DirectoryError>;
}

/// HTTP implementation of [`DirectoryApi`].
pub struct HttpDirectoryApi {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl HttpDirectoryApi {
    /// Build a client from the directory configuration.
    ///
    /// The client-level timeout matches the per-call budget so a hung socket
    /// is torn down even if the caller drops the timeout future late.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("orgmatch/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn enrich_organization(
        &self,
        domain: &str,
    ) -> Result<OrganizationRecord, DirectoryError> {
        self.enrich_by_domain(domain).await
    }

    async fn search_organizations(
        &self,
        query: &OrganizationQuery<'_>,
    ) -> Result<Vec<Candidate>, DirectoryError> {
        self.search_by_name(query).await
    }

    async fn search_people(
        &self,
        query: &PeopleQuery<'_>,
    ) -> Result<Vec<DecisionMaker>, DirectoryError> {
        self.search_people_at(query).await
    }
}
