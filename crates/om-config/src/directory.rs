//! Business directory API configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_base_url() -> String {
    String::from("https://api.apollo.io/api/v1")
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_rate_limit_backoff_ms() -> u64 {
    2_000
}

const fn default_transient_backoff_ms() -> u64 {
    500
}

const fn default_one() -> u32 {
    1
}

const fn default_search_page_size() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// API credential sent with every request.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the directory REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hard per-call timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fixed wait before retrying a rate-limited call.
    #[serde(default = "default_rate_limit_backoff_ms")]
    pub rate_limit_backoff_ms: u64,

    /// Retries after a rate-limited response.
    #[serde(default = "default_one")]
    pub rate_limit_retries: u32,

    /// Wait before retrying a timeout, network failure or server error.
    #[serde(default = "default_transient_backoff_ms")]
    pub transient_backoff_ms: u64,

    /// Retries after a transient failure.
    #[serde(default = "default_one")]
    pub transient_retries: u32,

    /// Candidates requested per name search.
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            rate_limit_backoff_ms: default_rate_limit_backoff_ms(),
            rate_limit_retries: default_one(),
            transient_backoff_ms: default_transient_backoff_ms(),
            transient_retries: default_one(),
            search_page_size: default_search_page_size(),
        }
    }
}

impl DirectoryConfig {
    /// Check if the directory config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn rate_limit_backoff(&self) -> Duration {
        Duration::from_millis(self.rate_limit_backoff_ms)
    }

    #[must_use]
    pub const fn transient_backoff(&self) -> Duration {
        Duration::from_millis(self.transient_backoff_ms)
    }
}
