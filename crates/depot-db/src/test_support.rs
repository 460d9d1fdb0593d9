//! Shared test utilities for depot-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};
    use depot_core::clock::ManualClock;
    use depot_core::entities::NotificationEvent;
    use depot_core::enums::EventStatus;

    use crate::DepotDb;
    use crate::service::DepotService;

    /// Fixed starting instant for manual clocks.
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    /// Create an in-memory DepotService driven by a manual clock.
    pub async fn test_service() -> (DepotService, Arc<ManualClock>) {
        let db = DepotDb::open_local(":memory:").await.unwrap();
        let clock = Arc::new(ManualClock::new(epoch()));
        (DepotService::from_db(db, clock.clone()), clock)
    }

    /// An event created and last updated at `at`.
    pub fn event_at(id: &str, status: EventStatus, at: DateTime<Utc>) -> NotificationEvent {
        NotificationEvent::new(id, status, at)
    }
}
