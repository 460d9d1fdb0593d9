use anyhow::Context;
use clap::{Parser, ValueEnum};
use depot_config::DepotConfig;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `depot` binary.
#[derive(Debug, Parser)]
#[command(name = "depot", version, about = "depot - artifact refresh notification ledger")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Table coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Local database file, overriding `store.path` and any remote `store.url`
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    ///
    /// # Errors
    ///
    /// Fails when no `--format` is given and the configured default format is
    /// not a known output format.
    pub fn global_flags(&self, config: &DepotConfig) -> anyhow::Result<GlobalFlags> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.general.default_format, true)
                .map_err(|error| anyhow::anyhow!(error))
                .with_context(|| {
                    format!(
                        "invalid general.default_format '{}'",
                        config.general.default_format
                    )
                })?,
        };

        Ok(GlobalFlags {
            format,
            color: self.color,
            quiet: self.quiet,
            verbose: self.verbose,
        })
    }
}
