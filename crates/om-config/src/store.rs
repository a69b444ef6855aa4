//! Lead store configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from(".orgmatch/leads.db")
}

const fn default_stale_after_mins() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path to the libSQL database file.
    #[serde(default = "default_path")]
    pub path: String,

    /// Minutes after which a lead still marked `running` is reported as stale.
    #[serde(default = "default_stale_after_mins")]
    pub stale_after_mins: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            stale_after_mins: default_stale_after_mins(),
        }
    }
}
