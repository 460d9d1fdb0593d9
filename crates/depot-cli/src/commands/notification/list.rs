use depot_db::query::NotificationFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListArgs;
use crate::commands::shared::parse::{apply_coordinate, parse_bool, parse_datetime};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CountResponse {
    count: u64,
}

pub async fn run(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(args)?;

    if args.count {
        let count = ctx.service.count(&filter).await?;
        return output(&CountResponse { count }, flags.format);
    }

    let mut events = ctx.service.search(&filter).await?;
    if let Some(limit) = args.limit {
        events.truncate(limit);
    }
    output(&events, flags.format)
}

fn build_filter(args: &ListArgs) -> anyhow::Result<NotificationFilter> {
    let mut filter = apply_coordinate(NotificationFilter::new(), &args.coordinate)?;
    filter.parent_event_id = args.parent.clone();
    filter.success = args
        .success
        .as_deref()
        .map(|raw| parse_bool(raw, "success"))
        .transpose()?;
    filter.from_date = args
        .from
        .as_deref()
        .map(|raw| parse_datetime(raw, "from"))
        .transpose()?;
    filter.to_date = args
        .to
        .as_deref()
        .map(|raw| parse_datetime(raw, "to"))
        .transpose()?;
    Ok(filter)
}
