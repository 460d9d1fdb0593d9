//! JSONL export and import of the ledger.
//!
//! One `NotificationEvent` per line, in the same camelCase shape the ledger
//! serializes everywhere else (unset fields omitted). Import replays a file
//! through the normal insert path, so importing the same file twice leaves
//! the ledger unchanged.

use std::path::Path;

use depot_core::entities::NotificationEvent;

use crate::error::DatabaseError;
use crate::service::DepotService;

/// Write events to a JSONL file, replacing any existing content.
///
/// # Errors
///
/// Returns `DatabaseError` if the file cannot be written.
pub fn write_jsonl(path: &Path, events: &[NotificationEvent]) -> Result<(), DatabaseError> {
    serde_jsonlines::write_json_lines(path, events).map_err(|e| DatabaseError::Other(e.into()))
}

/// Read every event from a JSONL file.
///
/// # Errors
///
/// Returns `DatabaseError` if the file cannot be read or a line is not a
/// valid event.
pub fn read_jsonl(path: &Path) -> Result<Vec<NotificationEvent>, DatabaseError> {
    let events: Vec<NotificationEvent> = serde_jsonlines::json_lines(path)
        .map_err(|e| DatabaseError::Other(e.into()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DatabaseError::Other(e.into()))?;
    Ok(events)
}

impl DepotService {
    /// Dump the whole ledger to a JSONL file. Returns the number of events.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the read or the file write fails.
    pub async fn export_jsonl(&self, path: &Path) -> Result<usize, DatabaseError> {
        let events = self.list_all().await?;
        write_jsonl(path, &events)?;
        tracing::info!(path = %path.display(), count = events.len(), "exported notifications");
        Ok(events.len())
    }

    /// Upsert every event of a JSONL file. Returns the number of events.
    ///
    /// Stops at the first failing write; earlier events stay written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file cannot be parsed or a write fails.
    pub async fn import_jsonl(&self, path: &Path) -> Result<usize, DatabaseError> {
        let events = read_jsonl(path)?;
        for event in &events {
            self.insert(event).await?;
        }
        tracing::info!(path = %path.display(), count = events.len(), "imported notifications");
        Ok(events.len())
    }
}
