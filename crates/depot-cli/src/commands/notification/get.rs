use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Print the event, or `null` when the id is unknown.
pub async fn run(event_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let event = ctx.service.get(event_id).await?;
    output(&event, flags.format)
}
