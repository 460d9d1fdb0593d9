//! # depot-db
//!
//! libSQL storage for the depot notification ledger.
//!
//! Every artifact refresh attempt is recorded as one row keyed by its event
//! id. Producers append an event when an operation starts and complete it
//! with a terminal status through the same upsert path; monitoring and purge
//! workflows query and delete through `DepotService`.
//!
//! Works against a local file (or `:memory:`) or a remote libSQL/Turso
//! server. The ledger holds no state beyond the connection: no caches, no
//! background work, no internal retries.

pub mod error;
pub mod export;
pub mod helpers;
pub mod migrations;
pub mod query;
pub mod repos;
pub mod service;
pub mod transient;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle for the notification ledger.
pub struct DepotDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl DepotDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Unavailable` if the database cannot be opened,
    /// or `DatabaseError::Migration` if migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Unavailable(format!("open {path}: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Unavailable(format!("connect {path}: {e}")))?;

        let depot_db = Self {
            db,
            conn,
            remote: false,
        };
        depot_db.run_migrations().await?;
        tracing::debug!(path, "opened local notification store");
        Ok(depot_db)
    }

    /// Open a remote libSQL server (e.g., Turso).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Unavailable` if the server cannot be reached,
    /// or `DatabaseError::Migration` if migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await
            .map_err(|e| DatabaseError::Unavailable(format!("open {url}: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Unavailable(format!("connect {url}: {e}")))?;

        let depot_db = Self {
            db,
            conn,
            remote: true,
        };
        depot_db.run_migrations().await?;
        tracing::debug!(url, "opened remote notification store");
        Ok(depot_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"evt-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT lower(hex(randomblob(4)))", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(depot_core::ids::format_id(prefix, &row.get::<String>(0)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::{EVENT_ID_INDEX, INDEX_PLAN};
    use std::collections::HashSet;

    async fn test_db() -> DepotDb {
        DepotDb::open_local(":memory:").await.unwrap()
    }

    /// First `detail` column of `EXPLAIN QUERY PLAN` for a statement.
    async fn query_plan(db: &DepotDb, sql: &str) -> String {
        let mut rows = db
            .conn()
            .query(&format!("EXPLAIN QUERY PLAN {sql}"), ())
            .await
            .unwrap();
        let mut details = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            details.push(row.get::<String>(3).unwrap());
        }
        details.join(" | ")
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='notifications'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
        assert!(!db.is_remote());
    }

    #[tokio::test]
    async fn every_planned_index_exists() {
        let db = test_db().await;
        for index in INDEX_PLAN {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='index' AND name=?1",
                    [index.name],
                )
                .await
                .unwrap();
            assert!(
                rows.next().await.unwrap().is_some(),
                "index '{}' should exist",
                index.name
            );
        }
    }

    #[tokio::test]
    async fn index_columns_match_plan() {
        let db = test_db().await;
        for index in INDEX_PLAN {
            let mut rows = db
                .conn()
                .query(&format!("PRAGMA index_info('{}')", index.name), ())
                .await
                .unwrap();
            let mut columns = Vec::new();
            while let Some(row) = rows.next().await.unwrap() {
                columns.push(row.get::<String>(2).unwrap());
            }
            assert_eq!(columns, index.columns, "columns of '{}'", index.name);
        }
    }

    #[tokio::test]
    async fn single_field_lookups_use_an_index() {
        let db = test_db().await;
        let cases = [
            (
                "SELECT * FROM notifications WHERE parent_event_id = ?1",
                "idx_notifications_parent_event_id",
            ),
            (
                "SELECT * FROM notifications WHERE status = ?1",
                "idx_notifications_status",
            ),
            (
                "SELECT * FROM notifications WHERE last_updated <= ?1",
                "idx_notifications_last_updated",
            ),
            (
                "SELECT * FROM notifications WHERE group_id = ?1 AND artifact_id = ?2 AND version_id = ?3",
                "idx_notifications_coordinate",
            ),
            (
                "SELECT * FROM notifications WHERE event_id = ?1",
                EVENT_ID_INDEX,
            ),
        ];
        for (sql, index) in cases {
            let plan = query_plan(&db, sql).await;
            assert!(
                plan.contains(index),
                "expected '{sql}' to use {index}, plan was: {plan}"
            );
            assert!(!plan.starts_with("SCAN"), "full scan for '{sql}': {plan}");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("evt").await.unwrap();
        assert!(id.starts_with("evt-"), "ID should start with 'evt-': {id}");
        assert_eq!(id.len(), 12, "ID should be 12 chars: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("evt").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn open_local_reopens_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depot.db");
        let path = path.to_string_lossy();

        {
            let db = DepotDb::open_local(&path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO notifications (event_id, status, created_at, last_updated) VALUES ('e1', 'SUCCESS', 0, 0)",
                    (),
                )
                .await
                .unwrap();
        }

        let db = DepotDb::open_local(&path).await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT count(*) FROM notifications", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }
}
