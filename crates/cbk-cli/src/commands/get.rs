use serde::Serialize;

use cbk_core::entities::{AuditEntry, Case};
use cbk_store::AuditFilter;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CaseDetailResponse<'a> {
    case: &'a Case,
    history: Vec<&'a AuditEntry>,
}

/// Handle `cbk get`.
pub fn handle(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let case = ctx.service.get(id)?;
    let history = ctx.service.audit_log(&AuditFilter {
        target_id: Some(id.to_string()),
        ..AuditFilter::default()
    });

    output(&CaseDetailResponse { case, history }, flags.format)
}
