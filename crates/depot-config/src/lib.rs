//! # depot-config
//!
//! Layered configuration loading for the depot using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DEPOT_*` prefix, `__` as separator)
//! 2. Project-level `.depot/config.toml`
//! 3. User-level `~/.config/depot/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DEPOT_STORE__PATH` -> `store.path`,
//! `DEPOT_STORE__AUTH_TOKEN` -> `store.auth_token`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use depot_config::DepotConfig;
//!
//! let config = DepotConfig::load_with_dotenv().expect("config");
//! if config.store.is_remote() {
//!     println!("Remote store: {}", config.store.url);
//! }
//! ```

mod error;
mod general;
mod store;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file, relative to the project root.
pub const PROJECT_CONFIG_PATH: &str = ".depot/config.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DEPOT_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DepotConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl DepotConfig {
    /// Load configuration from all sources (TOML files + environment variables),
    /// resolving the project file against the current directory.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or the merged
    /// `store` section is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration using `project_root/.depot/config.toml` as the
    /// project layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or the merged
    /// `store` section is invalid.
    pub fn load_from(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_root).extract()?;
        config.store.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain rooted at the current directory.
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain for a given project root.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = project_root.join(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("depot").join("config.toml"))
    }
}
