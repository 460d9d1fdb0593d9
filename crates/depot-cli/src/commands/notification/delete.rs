use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse<'a> {
    event_id: &'a str,
    existed: bool,
}

pub async fn run(event_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let existed = ctx.service.delete(event_id).await?;
    output(&DeleteResponse { event_id, existed }, flags.format)
}
