//! # om-config
//!
//! Layered configuration loading for orgmatch using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ORGMATCH_*` prefix, `__` as separator)
//! 2. Project-level `.orgmatch/config.toml`
//! 3. User-level `~/.config/orgmatch/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ORGMATCH_DIRECTORY__API_KEY` -> `directory.api_key`,
//! `ORGMATCH_RESOLUTION__REGION_HINT` -> `resolution.region_hint`, etc.
//!
//! ```no_run
//! use om_config::OrgMatchConfig;
//!
//! let config = OrgMatchConfig::load_with_dotenv().expect("config");
//! if !config.directory.is_configured() {
//!     eprintln!("set ORGMATCH_DIRECTORY__API_KEY");
//! }
//! ```

mod directory;
mod error;
mod resolution;
mod store;

pub use directory::DirectoryConfig;
pub use error::ConfigError;
pub use resolution::{DEFAULT_GENERIC_DOMAINS, ResolutionConfig};
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrgMatchConfig {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub resolution: ResolutionConfig,
}

impl OrgMatchConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".orgmatch/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ORGMATCH_").split("__"))
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an out-of-range threshold or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.resolution.similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                field: "resolution.similarity_threshold".into(),
                reason: format!("{threshold} is outside [0, 1]"),
            });
        }
        if self.directory.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "directory.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Fail unless the directory credential is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when `directory.api_key` is empty.
    pub fn require_directory(&self) -> Result<&DirectoryConfig, ConfigError> {
        if self.directory.is_configured() {
            Ok(&self.directory)
        } else {
            Err(ConfigError::NotConfigured {
                section: "directory".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("orgmatch").join("config.toml"))
    }
}
