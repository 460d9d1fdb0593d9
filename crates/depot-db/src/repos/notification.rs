//! Notification ledger repository.
//!
//! One identity-keyed record per refresh attempt. A single upsert is the
//! only write path: producers append on start and complete with a terminal
//! status under the same event id. Lookups of unknown ids return `None` and
//! deletes of unknown ids are no-ops.

use chrono::{DateTime, Utc};
use depot_core::entities::NotificationEvent;
use depot_core::validation::validate_event;

use crate::error::DatabaseError;
use crate::helpers::{
    from_millis, get_opt_string, json_to_column, non_empty, parse_optional_json, parse_status,
    to_millis,
};
use crate::query::NotificationFilter;
use crate::service::DepotService;

const COLUMNS: &str = "event_id, parent_event_id, group_id, artifact_id, version_id, \
                       status, detail, created_at, last_updated";

fn row_to_event(row: &libsql::Row) -> Result<NotificationEvent, DatabaseError> {
    Ok(NotificationEvent {
        event_id: row.get::<String>(0)?,
        parent_event_id: get_opt_string(row, 1)?,
        group_id: get_opt_string(row, 2)?,
        artifact_id: get_opt_string(row, 3)?,
        version_id: get_opt_string(row, 4)?,
        status: parse_status(&row.get::<String>(5)?),
        detail: parse_optional_json(get_opt_string(row, 6)?.as_deref())?,
        created_at: from_millis(row.get::<i64>(7)?)?,
        last_updated: from_millis(row.get::<i64>(8)?)?,
    })
}

async fn collect_events(mut rows: libsql::Rows) -> Result<Vec<NotificationEvent>, DatabaseError> {
    let mut events = Vec::new();
    while let Some(row) = rows.next().await? {
        events.push(row_to_event(&row)?);
    }
    Ok(events)
}

impl DepotService {
    /// Write the event keyed by `event_id`: create it, or replace every stored
    /// field except `event_id` and the original `created_at`.
    ///
    /// Stored exactly as given, `last_updated` included. Use [`Self::complete`]
    /// to stamp `last_updated` from the clock.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Unavailable` if the store cannot be reached, or
    /// another `DatabaseError` if the write fails.
    pub async fn append_or_update(&self, event: &NotificationEvent) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO notifications ({COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                     ON CONFLICT(event_id) DO UPDATE SET
                       parent_event_id = excluded.parent_event_id,
                       group_id = excluded.group_id,
                       artifact_id = excluded.artifact_id,
                       version_id = excluded.version_id,
                       status = excluded.status,
                       detail = excluded.detail,
                       last_updated = excluded.last_updated"
                ),
                libsql::params![
                    event.event_id.as_str(),
                    non_empty(event.parent_event_id.as_deref()),
                    non_empty(event.group_id.as_deref()),
                    non_empty(event.artifact_id.as_deref()),
                    non_empty(event.version_id.as_deref()),
                    event.status.as_str(),
                    json_to_column(event.detail.as_ref()),
                    to_millis(event.created_at),
                    to_millis(event.last_updated)
                ],
            )
            .await?;

        tracing::debug!(
            event_id = %event.event_id,
            status = %event.status,
            "notification written"
        );
        Ok(())
    }

    /// Append a new attempt after running the validation hook.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the event is rejected, or any
    /// error from [`Self::append_or_update`].
    pub async fn insert(&self, event: &NotificationEvent) -> Result<(), DatabaseError> {
        validate_event(event)?;
        self.append_or_update(event).await
    }

    /// Complete an attempt: stamp `last_updated` with the clock and upsert.
    ///
    /// Callers pass the event with the same id and identity fields as the
    /// original append (see [`NotificationEvent::completed`]). Returns the
    /// event as written.
    ///
    /// # Errors
    ///
    /// Same as [`Self::insert`].
    pub async fn complete(
        &self,
        event: &NotificationEvent,
    ) -> Result<NotificationEvent, DatabaseError> {
        let completed = event.clone().with_last_updated(self.now());
        validate_event(&completed)?;
        self.append_or_update(&completed).await?;
        Ok(completed)
    }

    /// Point lookup by event id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails. A missing id is `Ok(None)`.
    pub async fn get(&self, event_id: &str) -> Result<Option<NotificationEvent>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM notifications WHERE event_id = ?1"),
                [event_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_event(&row)?)),
            None => Ok(None),
        }
    }

    /// Search with the upper time bound defaulting to the clock's now.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn search(
        &self,
        filter: &NotificationFilter,
    ) -> Result<Vec<NotificationEvent>, DatabaseError> {
        self.search_at(filter, self.now()).await
    }

    /// Search evaluated at an explicit `now`.
    ///
    /// Results are ordered by `last_updated` descending (ties by event id).
    /// No implicit limit: bound the time window to page.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn search_at(
        &self,
        filter: &NotificationFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<NotificationEvent>, DatabaseError> {
        let query = filter.compose(now);
        let sql = format!(
            "SELECT {COLUMNS} FROM notifications {}
             ORDER BY last_updated DESC, event_id ASC",
            query.where_clause()
        );

        let rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(query.params))
            .await?;
        let events = collect_events(rows).await?;

        tracing::debug!(?filter, results = events.len(), "notification search");
        Ok(events)
    }

    /// Number of records a search would return, evaluated at the clock's now.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count(&self, filter: &NotificationFilter) -> Result<u64, DatabaseError> {
        let query = filter.compose(self.now());
        let sql = format!(
            "SELECT COUNT(*) FROM notifications {}",
            query.where_clause()
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(query.params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        u64::try_from(row.get::<i64>(0)?)
            .map_err(|e| DatabaseError::InvalidState(format!("negative count: {e}")))
    }

    /// Remove an event. Idempotent: unknown ids are a no-op. Children that
    /// reference it through `parent_event_id` are left untouched.
    ///
    /// Returns whether this call removed a record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete(&self, event_id: &str) -> Result<bool, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute("DELETE FROM notifications WHERE event_id = ?1", [event_id])
            .await?;
        tracing::debug!(event_id, removed, "notification delete");
        Ok(removed > 0)
    }

    /// Remove an event only while its `last_updated` is still at or before
    /// `cutoff`. An event completed after it was selected for expiry stays.
    ///
    /// Returns whether this call removed a record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_if_expired(
        &self,
        event_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM notifications WHERE event_id = ?1 AND last_updated <= ?2",
                libsql::params![event_id, to_millis(cutoff)],
            )
            .await?;
        tracing::debug!(event_id, %cutoff, removed, "notification expiry delete");
        Ok(removed > 0)
    }

    /// Unfiltered dump in storage order, for administrative export.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<NotificationEvent>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM notifications ORDER BY rowid"),
                (),
            )
            .await?;
        collect_events(rows).await
    }
}
