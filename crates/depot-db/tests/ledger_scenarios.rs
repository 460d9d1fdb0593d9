//! End-to-end ledger behavior through the public `DepotService` API.
//!
//! Covers the producer flow (append, then complete), retry correlation via
//! `parent_event_id`, time-bounded status queries, and purge-style deletes.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use depot_core::clock::{Clock, ManualClock};
use depot_core::entities::{Coordinate, NotificationEvent};
use depot_core::enums::EventStatus;
use depot_db::DepotDb;
use depot_db::error::DatabaseError;
use depot_db::query::NotificationFilter;
use depot_db::service::DepotService;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 15, 9, 0, 0).unwrap()
}

async fn ledger() -> (DepotService, Arc<ManualClock>) {
    let db = DepotDb::open_local(":memory:").await.unwrap();
    let clock = Arc::new(ManualClock::new(t0()));
    (DepotService::from_db(db, clock.clone()), clock)
}

fn ids(events: &[NotificationEvent]) -> Vec<String> {
    events.iter().map(|e| e.event_id.clone()).collect()
}

#[tokio::test]
async fn append_then_complete_is_visible_by_group() {
    let (svc, clock) = ledger().await;
    let started = NotificationEvent::new("e1", EventStatus::InProgress, clock.now())
        .with_coordinate(Coordinate::new("g", "a", "1.0.0"));
    svc.insert(&started).await.unwrap();

    clock.advance(Duration::seconds(42));
    svc.complete(&started.clone().completed(EventStatus::Success, None))
        .await
        .unwrap();

    let results = svc.search(&NotificationFilter::new().group("g")).await.unwrap();
    assert_eq!(ids(&results), vec!["e1"]);
    assert_eq!(results[0].status, EventStatus::Success);
    assert_eq!(results[0].version_id.as_deref(), Some("1.0.0"));
    assert_eq!(results[0].last_updated, t0() + Duration::seconds(42));
}

#[tokio::test]
async fn children_are_found_by_parent() {
    let (svc, clock) = ledger().await;
    svc.insert(&NotificationEvent::new("e1", EventStatus::Failed, clock.now()))
        .await
        .unwrap();
    svc.insert(&NotificationEvent::new("e2", EventStatus::InProgress, clock.now()).with_parent("e1"))
        .await
        .unwrap();

    let children = svc.search(&NotificationFilter::new().parent("e1")).await.unwrap();
    assert_eq!(ids(&children), vec!["e2"]);
}

#[rstest]
#[case(Some(false), true)]
#[case(Some(true), false)]
#[case(None, true)]
#[tokio::test]
async fn failed_event_within_window(#[case] success: Option<bool>, #[case] expected: bool) {
    let (svc, clock) = ledger().await;
    svc.insert(&NotificationEvent::new("e3", EventStatus::Failed, t0()))
        .await
        .unwrap();
    clock.advance(Duration::hours(6));

    let mut filter = NotificationFilter::new()
        .since(t0() - Duration::hours(1))
        .until(t0() + Duration::hours(1));
    filter.success = success;

    let results = svc.search(&filter).await.unwrap();
    if expected {
        assert_eq!(ids(&results), vec!["e3"]);
    } else {
        assert!(results.is_empty());
    }
}

#[tokio::test]
async fn deleting_parent_leaves_children() {
    let (svc, clock) = ledger().await;
    svc.insert(&NotificationEvent::new("e1", EventStatus::Failed, clock.now()))
        .await
        .unwrap();
    svc.insert(&NotificationEvent::new("e2", EventStatus::Success, clock.now()).with_parent("e1"))
        .await
        .unwrap();

    svc.delete("e1").await.unwrap();

    assert_eq!(svc.get("e1").await.unwrap(), None);
    let children = svc.search(&NotificationFilter::new().parent("e1")).await.unwrap();
    assert_eq!(ids(&children), vec!["e2"]);
}

#[tokio::test]
async fn dangling_and_cyclic_parents_are_tolerated() {
    let (svc, clock) = ledger().await;
    svc.insert(&NotificationEvent::new("x", EventStatus::Failed, clock.now()).with_parent("y"))
        .await
        .unwrap();
    svc.insert(&NotificationEvent::new("y", EventStatus::Failed, clock.now()).with_parent("x"))
        .await
        .unwrap();
    svc.insert(&NotificationEvent::new("z", EventStatus::Failed, clock.now()).with_parent("ghost"))
        .await
        .unwrap();

    assert_eq!(svc.list_all().await.unwrap().len(), 3);
    let orphans = svc.search(&NotificationFilter::new().parent("ghost")).await.unwrap();
    assert_eq!(ids(&orphans), vec!["z"]);
}

#[tokio::test]
async fn retry_chain_is_traceable_from_root() {
    let (svc, clock) = ledger().await;
    let coordinate = Coordinate::new("org.finos", "showcase", "3.1.0");
    let mut parent: Option<String> = None;
    for attempt in 1..=3 {
        let id = format!("attempt-{attempt}");
        let mut event = NotificationEvent::new(&id, EventStatus::InProgress, clock.now())
            .with_coordinate(coordinate.clone());
        event.parent_event_id = parent.clone();
        svc.insert(&event).await.unwrap();

        clock.advance(Duration::minutes(1));
        let status = if attempt == 3 {
            EventStatus::Success
        } else {
            EventStatus::Failed
        };
        svc.complete(&event.completed(status, None)).await.unwrap();
        parent = Some(id);
    }

    let mut chain = vec!["attempt-1".to_string()];
    while let Some(last) = chain.last().cloned() {
        let next = svc.search(&NotificationFilter::new().parent(last)).await.unwrap();
        match next.first() {
            Some(child) => chain.push(child.event_id.clone()),
            None => break,
        }
    }
    assert_eq!(chain, vec!["attempt-1", "attempt-2", "attempt-3"]);

    let failures = svc
        .search(&NotificationFilter::new().coordinate(coordinate).success(false))
        .await
        .unwrap();
    assert_eq!(ids(&failures), vec!["attempt-2", "attempt-1"]);
}

#[tokio::test]
async fn purge_by_window_deletes_only_old_records() {
    let (svc, clock) = ledger().await;
    svc.insert(&NotificationEvent::new("old", EventStatus::Success, clock.now()))
        .await
        .unwrap();
    clock.advance(Duration::days(30));
    svc.insert(&NotificationEvent::new("recent", EventStatus::Success, clock.now()))
        .await
        .unwrap();

    let cutoff = clock.now() - Duration::days(7);
    let expired = svc.search(&NotificationFilter::new().until(cutoff)).await.unwrap();
    for event in &expired {
        svc.delete(&event.event_id).await.unwrap();
    }

    assert_eq!(ids(&expired), vec!["old"]);
    assert_eq!(ids(&svc.list_all().await.unwrap()), vec!["recent"]);
}

#[tokio::test]
async fn file_backed_store_is_shared_between_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("depot.db");
    let path = path.to_string_lossy();

    let producer = DepotService::new_local(&path).await.unwrap();
    let consumer = DepotService::new_local(&path).await.unwrap();

    let now = producer.now();
    producer
        .insert(&NotificationEvent::new("e1", EventStatus::Success, now))
        .await
        .unwrap();

    let seen = consumer.get("e1").await.unwrap().unwrap();
    assert_eq!(seen.status, EventStatus::Success);
}

#[tokio::test]
async fn locked_store_reports_transient_unavailability() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("depot.db");
    let path = path.to_string_lossy();

    let holder = DepotDb::open_local(&path).await.unwrap();
    let writer = DepotService::new_local(&path).await.unwrap();

    holder.conn().execute("BEGIN EXCLUSIVE", ()).await.unwrap();
    let err = writer
        .insert(&NotificationEvent::new("e1", EventStatus::Success, writer.now()))
        .await
        .unwrap_err();
    holder.conn().execute("ROLLBACK", ()).await.unwrap();

    assert!(matches!(err, DatabaseError::Unavailable(_)), "got {err:?}");
    assert!(err.is_transient());

    // Retrying the same event id after the lock is released succeeds.
    writer
        .insert(&NotificationEvent::new("e1", EventStatus::Success, writer.now()))
        .await
        .unwrap();
    assert!(writer.get("e1").await.unwrap().is_some());
}
