use depot_config::DepotConfig;

use crate::cli::Cli;

/// Load `.env`, the layered config, then apply command-line overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<DepotConfig> {
    let mut config = DepotConfig::load_with_dotenv()?;
    apply_db_override(&mut config, cli.db.as_deref());
    Ok(config)
}

/// `--db` always selects a local file, even when a remote URL is configured.
fn apply_db_override(config: &mut DepotConfig, db: Option<&str>) {
    if let Some(path) = db {
        tracing::debug!(path, "using --db override");
        config.store.path = path.to_string();
        config.store.url.clear();
        config.store.auth_token.clear();
    }
}
