use clap::{Args, Subcommand};

/// Notification ledger commands.
#[derive(Clone, Debug, Subcommand)]
pub enum NotificationCommands {
    /// Record a new event, or overwrite the event with the same id.
    Append(AppendArgs),
    /// Stamp an existing event with its final status.
    Complete {
        event_id: String,
        #[arg(long)]
        status: String,
        /// JSON payload; plain text is stored as a JSON string.
        #[arg(long)]
        detail: Option<String>,
    },
    /// Get an event by id.
    Get { event_id: String },
    /// Search events, newest first.
    List(ListArgs),
    /// Delete an event by id. Deleting an unknown id is not an error.
    Delete { event_id: String },
    /// Write every event to JSONL (stdout when no output file is given).
    Export {
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Upsert every event of a JSONL file.
    Import { file: String },
    /// Delete every event last updated at or before a cutoff.
    Purge {
        /// RFC 3339 timestamp or `YYYY-MM-DD` (midnight UTC).
        #[arg(long)]
        before: String,
        /// Report what would be deleted without deleting it.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Clone, Debug, Args)]
pub struct AppendArgs {
    /// Event id; a fresh `evt-` id is generated when omitted.
    #[arg(long)]
    pub event_id: Option<String>,
    #[arg(long)]
    pub status: String,
    /// Earlier event this one retries or follows.
    #[arg(long)]
    pub parent: Option<String>,
    #[command(flatten)]
    pub coordinate: CoordinateArgs,
    /// JSON payload; plain text is stored as a JSON string.
    #[arg(long)]
    pub detail: Option<String>,
}

#[derive(Clone, Debug, Default, Args)]
pub struct CoordinateArgs {
    /// Full `group:artifact:version` coordinate.
    #[arg(long, conflicts_with_all = ["group_id", "artifact_id", "version_id"])]
    pub coordinate: Option<String>,
    #[arg(long)]
    pub group_id: Option<String>,
    #[arg(long)]
    pub artifact_id: Option<String>,
    #[arg(long)]
    pub version_id: Option<String>,
}

#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub coordinate: CoordinateArgs,
    #[arg(long)]
    pub parent: Option<String>,
    /// `true` matches SUCCESS, `false` matches FAILED.
    #[arg(long)]
    pub success: Option<String>,
    /// Lower bound on lastUpdated (inclusive).
    #[arg(long)]
    pub from: Option<String>,
    /// Upper bound on lastUpdated (inclusive); defaults to now.
    #[arg(long)]
    pub to: Option<String>,
    /// Keep only the first N results.
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Print the number of matches instead of the events.
    #[arg(long, conflicts_with = "limit")]
    pub count: bool,
}
