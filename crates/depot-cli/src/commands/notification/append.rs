use depot_core::entities::NotificationEvent;
use depot_core::ids::PREFIX_EVENT;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AppendArgs;
use crate::commands::shared::parse::{coordinate_parts, parse_detail, parse_status};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &AppendArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let event = build_event(args, ctx).await?;
    ctx.service.insert(&event).await?;
    tracing::info!(event_id = %event.event_id, status = %event.status, "appended notification");
    output(&event, flags.format)
}

async fn build_event(args: &AppendArgs, ctx: &AppContext) -> anyhow::Result<NotificationEvent> {
    let status = parse_status(&args.status)?;
    let event_id = match args.event_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => ctx.service.db().generate_id(PREFIX_EVENT).await?,
    };
    let (group_id, artifact_id, version_id) = coordinate_parts(&args.coordinate)?;

    let mut event = NotificationEvent::new(event_id, status, ctx.service.now());
    event.parent_event_id = args.parent.clone();
    event.group_id = group_id;
    event.artifact_id = artifact_id;
    event.version_id = version_id;
    event.detail = args.detail.as_deref().map(parse_detail);
    Ok(event)
}
