use clap::Subcommand;

use crate::cli::subcommands::NotificationCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Notification ledger records.
    #[command(alias = "notifications")]
    Notification {
        #[command(subcommand)]
        action: NotificationCommands,
    },
}
