use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExportResponse<'a> {
    path: &'a str,
    exported: usize,
}

/// With `--output`, write the JSONL file and report the count; otherwise
/// stream one event per line to stdout regardless of `--format`.
pub async fn run(
    output_path: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Some(path) = output_path {
        let exported = ctx.service.export_jsonl(Path::new(path)).await?;
        return output(&ExportResponse { path, exported }, flags.format);
    }

    let events = ctx.service.list_all().await?;
    let mut stdout = std::io::stdout().lock();
    for event in &events {
        serde_json::to_writer(&mut stdout, event)?;
        writeln!(stdout)?;
    }
    Ok(())
}
