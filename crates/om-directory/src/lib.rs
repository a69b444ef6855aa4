//! # om-directory
//!
//! Client for the external business directory used to resolve leads.
//!
//! Three operations are exposed, each returning a tagged [`Lookup`]:
//! - enrich an organization by web domain
//! - search organizations by name (optionally within a region)
//! - search decision-makers at an organization (best-effort for callers)
//!
//! [`DirectoryClient`] owns the failure semantics: a hard per-call timeout,
//! one fixed back-off retry on rate limiting, a bounded retry on transient
//! failures, cooperative cancellation, and truncation of list payloads before
//! anything is handed upstream. [`HttpDirectoryApi`] performs the actual
//! HTTP requests.

mod api;
mod client;
mod error;
mod http;
mod lookup;
mod organizations;
mod people;

pub use api::{DirectoryApi, HttpDirectoryApi, OrganizationQuery, PeopleQuery};
pub use client::{DirectoryClient, RetryPolicy};
pub use error::DirectoryError;
pub use lookup::{DirectoryFailure, FailureKind, Lookup};

use om_config::DirectoryConfig;

/// Build the production client from configuration.
///
/// # Errors
///
/// Returns [`DirectoryError`] if the HTTP client cannot be built.
pub fn http_client(config: &DirectoryConfig) -> Result<DirectoryClient<HttpDirectoryApi>, DirectoryError> {
    let api = HttpDirectoryApi::new(config)?;
    Ok(DirectoryClient::new(api, RetryPolicy::from_config(config))
        .with_page_size(config.search_page_size))
}
