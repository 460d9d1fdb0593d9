//! Database migration runner and index plan.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::DepotDb;
use crate::error::DatabaseError;

/// Notification table and its secondary indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_notifications.sql");

/// One access path the ledger keeps sub-linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Name SQLite gives the implicit unique index behind `event_id TEXT PRIMARY KEY`.
pub const EVENT_ID_INDEX: &str = "sqlite_autoindex_notifications_1";

/// Every access path on the `notifications` table, one per filter dimension.
pub const INDEX_PLAN: &[IndexSpec] = &[
    IndexSpec {
        name: "idx_notifications_parent_event_id",
        columns: &["parent_event_id"],
    },
    IndexSpec {
        name: "idx_notifications_status",
        columns: &["status"],
    },
    IndexSpec {
        name: "idx_notifications_last_updated",
        columns: &["last_updated"],
    },
    IndexSpec {
        name: "idx_notifications_coordinate",
        columns: &["group_id", "artifact_id", "version_id"],
    },
    IndexSpec {
        name: EVENT_ID_INDEX,
        columns: &["event_id"],
    },
];

impl DepotDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_notifications: {e}")))?;
        Ok(())
    }
}
