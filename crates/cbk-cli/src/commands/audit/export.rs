use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use cbk_core::responses::AuditExport;
use cbk_store::CaseService;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExportResponse {
    path: String,
    entries: usize,
}

pub fn run(out: Option<&str>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dir = out.map_or_else(
        || ctx.project_root.join(ctx.config.export.dir()),
        PathBuf::from,
    );
    let (path, entries) = write_export(&dir, &ctx.service)?;

    output(
        &ExportResponse {
            path: path.display().to_string(),
            entries,
        },
        flags.format,
    )
}

/// Write `audit-log-<millis>.json` into `dir`. One clock read stamps both
/// the file name and `exportedAt`.
fn write_export(dir: &Path, service: &CaseService) -> anyhow::Result<(PathBuf, usize)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;

    let at = service.now();
    let export = service.audit().export(at);
    let path = dir.join(AuditExport::file_name(at));
    std::fs::write(&path, export.to_json_pretty()?)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), entries = export.entries.len(), "audit log exported");
    Ok((path, export.entries.len()))
}
