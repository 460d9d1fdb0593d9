use depot_core::errors::CoreError;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_detail, parse_status};
use crate::context::AppContext;
use crate::output::output;

/// Complete a recorded attempt. The event must already exist so that its
/// identity fields carry over unchanged; a new `--detail` replaces the old one.
pub async fn run(
    event_id: &str,
    status: &str,
    detail: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = parse_status(status)?;
    let existing = ctx
        .service
        .get(event_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity_type: "notification".into(),
            id: event_id.to_string(),
        })?;

    let detail = detail.map(parse_detail).or_else(|| existing.detail.clone());
    let completed = ctx
        .service
        .complete(&existing.completed(status, detail))
        .await?;
    tracing::info!(event_id, status = %completed.status, "completed notification");
    output(&completed, flags.format)
}
