//! Notification store (libSQL) configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default local database path, relative to the working directory.
fn default_path() -> String {
    ".depot/depot.db".to_string()
}

const REMOTE_SCHEMES: &[&str] = &["libsql://", "http://", "https://"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote libSQL server URL (e.g., `libsql://depot-myorg.turso.io`).
    /// When set, the remote server is used instead of `path`.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote server.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl StoreConfig {
    /// Whether the store points at a remote libSQL server.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty()
    }

    /// Check that the section describes a reachable store.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when neither a path nor a URL is set, `InvalidValue`
    /// when the URL scheme is not one libSQL can speak.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_remote() {
            if !REMOTE_SCHEMES.iter().any(|scheme| self.url.starts_with(scheme)) {
                return Err(ConfigError::InvalidValue {
                    field: "store.url".into(),
                    reason: format!("unsupported scheme in '{}'", self.url),
                });
            }
            return Ok(());
        }
        if self.path.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "store".into(),
            });
        }
        Ok(())
    }
}
