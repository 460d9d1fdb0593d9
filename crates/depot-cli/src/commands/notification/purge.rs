use depot_db::query::NotificationFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_datetime;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PurgeResponse {
    before: String,
    dry_run: bool,
    purged: usize,
    /// Matched at or before the cutoff; with `--dry-run`, nothing is removed.
    event_ids: Vec<String>,
}

/// Delete every event whose `lastUpdated` is at or before the cutoff.
/// Children of purged events are kept when they are newer than the cutoff.
/// Each delete re-checks the cutoff, so an event completed after the search
/// survives and is left out of the `purged` count.
pub async fn run(
    before: &str,
    dry_run: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let cutoff = parse_datetime(before, "before")?;
    let expired = ctx
        .service
        .search(&NotificationFilter::new().until(cutoff))
        .await?;

    let event_ids: Vec<String> = expired.into_iter().map(|event| event.event_id).collect();
    let mut purged = 0;
    if !dry_run {
        for event_id in &event_ids {
            if ctx.service.delete_if_expired(event_id, cutoff).await? {
                purged += 1;
            }
        }
        tracing::info!(purged, %cutoff, "purged notifications");
    }

    output(
        &PurgeResponse {
            before: cutoff.to_rfc3339(),
            dry_run,
            purged,
            event_ids,
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use depot_config::DepotConfig;
    use depot_core::entities::NotificationEvent;
    use depot_core::enums::EventStatus;
    use pretty_assertions::assert_eq;

    use super::run;
    use crate::cli::{ColorMode, GlobalFlags, OutputFormat};
    use crate::context::AppContext;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            color: ColorMode::Never,
            quiet: true,
            verbose: false,
        }
    }

    async fn seeded() -> AppContext {
        let mut config = DepotConfig::default();
        config.store.path = ":memory:".to_string();
        let ctx = AppContext::init(&config).await.unwrap();

        let old = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
        ctx.service
            .append_or_update(&NotificationEvent::new("old", EventStatus::Failed, old))
            .await
            .unwrap();
        ctx.service
            .append_or_update(
                &NotificationEvent::new("child", EventStatus::Success, old + Duration::days(60))
                    .with_parent("old"),
            )
            .await
            .unwrap();
        ctx
    }

    fn ids(events: &[NotificationEvent]) -> Vec<&str> {
        events.iter().map(|e| e.event_id.as_str()).collect()
    }

    #[tokio::test]
    async fn purge_removes_only_events_at_or_before_cutoff() {
        let ctx = seeded().await;

        run("2026-01-10T00:00:00Z", false, &ctx, &flags())
            .await
            .unwrap();

        assert_eq!(ids(&ctx.service.list_all().await.unwrap()), vec!["child"]);
    }

    #[tokio::test]
    async fn dry_run_deletes_nothing() {
        let ctx = seeded().await;

        run("2026-02-01", true, &ctx, &flags()).await.unwrap();

        assert_eq!(ctx.service.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn bad_cutoff_is_rejected() {
        let ctx = seeded().await;
        assert!(run("last week", false, &ctx, &flags()).await.is_err());
    }
}
