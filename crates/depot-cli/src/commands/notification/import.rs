use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ImportResponse<'a> {
    path: &'a str,
    imported: usize,
}

pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let imported = ctx
        .service
        .import_jsonl(Path::new(file))
        .await
        .with_context(|| format!("failed to import {file}"))?;
    output(
        &ImportResponse {
            path: file,
            imported,
        },
        flags.format,
    )
}
