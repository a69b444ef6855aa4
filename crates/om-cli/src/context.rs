use std::path::Path;

use anyhow::Context;
use om_config::OrgMatchConfig;
use om_db::LeadStore;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: OrgMatchConfig,
    pub store: LeadStore,
}

impl AppContext {
    /// Open the lead store named by `store.path`, creating its directory.
    pub async fn init(config: OrgMatchConfig) -> anyhow::Result<Self> {
        let path = Path::new(&config.store.path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create store directory {}", parent.display())
            })?;
        }

        let store = LeadStore::open_local(&config.store.path)
            .await
            .with_context(|| format!("failed to open lead store at {}", config.store.path))?;

        Ok(Self { config, store })
    }
}

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &OrgMatchConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &OrgMatchConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mistyped_directory_key = env
        .into_iter()
        .any(|(key, _)| key.starts_with("ORGMATCH_DIRECTORY") && !key.starts_with("ORGMATCH_DIRECTORY__"));

    let mut warnings = Vec::new();
    if !config.directory.is_configured() && mistyped_directory_key {
        warnings.push(
            "Directory config appears default while ORGMATCH_DIRECTORY* env vars exist. Use double underscores (example: ORGMATCH_DIRECTORY__API_KEY)."
                .to_string(),
        );
    }
    warnings
}
