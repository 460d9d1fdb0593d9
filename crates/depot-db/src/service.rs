//! Service layer: the notification ledger façade.
//!
//! `DepotService` wraps `DepotDb` (raw database access) and a `Clock`. All
//! ledger operations are implemented as `impl DepotService` blocks in
//! `repos/`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use depot_core::clock::{Clock, SystemClock};

use crate::DepotDb;
use crate::error::DatabaseError;

/// Passive record-keeper over the shared notification store.
///
/// Holds no state across calls besides the connection and the clock.
/// Concurrent writers to distinct event ids need no coordination; two writes
/// to the same id resolve last-write-wins at the store.
pub struct DepotService {
    db: DepotDb,
    clock: Arc<dyn Clock>,
}

impl DepotService {
    /// Create a service over a local database using the system clock.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = DepotDb::open_local(db_path).await?;
        Ok(Self::from_db(db, Arc::new(SystemClock)))
    }

    /// Create a service over a remote libSQL server using the system clock.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Unavailable` if the server cannot be reached.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = DepotDb::open_remote(url, auth_token).await?;
        Ok(Self::from_db(db, Arc::new(SystemClock)))
    }

    /// Create from an existing `DepotDb` and clock (tests inject a `ManualClock`).
    #[must_use]
    pub fn from_db(db: DepotDb, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &DepotDb {
        &self.db
    }

    /// Current time according to the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
