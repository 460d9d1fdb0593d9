use std::path::Path;

use anyhow::Context;
use depot_config::DepotConfig;
use depot_db::service::DepotService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: DepotService,
}

impl AppContext {
    /// Open the configured store: the remote server when `store.url` is set,
    /// otherwise the local file (creating its directory on first use).
    pub async fn init(config: &DepotConfig) -> anyhow::Result<Self> {
        let service = if config.store.is_remote() {
            DepotService::new_remote(&config.store.url, &config.store.auth_token)
                .await
                .with_context(|| format!("failed to connect to {}", config.store.url))?
        } else {
            ensure_parent_dir(&config.store.path)?;
            DepotService::new_local(&config.store.path)
                .await
                .with_context(|| format!("failed to open {}", config.store.path))?
        };

        Ok(Self { service })
    }
}

fn ensure_parent_dir(db_path: &str) -> anyhow::Result<()> {
    if db_path == ":memory:" {
        return Ok(());
    }
    match Path::new(db_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))
        }
        _ => Ok(()),
    }
}
