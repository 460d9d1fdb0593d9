mod append;
mod complete;
mod delete;
mod export;
mod get;
mod import;
mod list;
mod purge;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::NotificationCommands;
use crate::context::AppContext;

/// Handle `depot notification`.
pub async fn handle(
    action: &NotificationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        NotificationCommands::Append(args) => append::run(args, ctx, flags).await,
        NotificationCommands::Complete {
            event_id,
            status,
            detail,
        } => complete::run(event_id, status, detail.as_deref(), ctx, flags).await,
        NotificationCommands::Get { event_id } => get::run(event_id, ctx, flags).await,
        NotificationCommands::List(args) => list::run(args, ctx, flags).await,
        NotificationCommands::Delete { event_id } => delete::run(event_id, ctx, flags).await,
        NotificationCommands::Export { output } => {
            export::run(output.as_deref(), ctx, flags).await
        }
        NotificationCommands::Import { file } => import::run(file, ctx, flags).await,
        NotificationCommands::Purge { before, dry_run } => {
            purge::run(before, *dry_run, ctx, flags).await
        }
    }
}
