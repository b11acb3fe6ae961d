#[path = "audit/export.rs"]
mod export;
#[path = "audit/list.rs"]
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditCommands;
use crate::context::AppContext;

/// Handle `cbk audit`.
pub fn handle(action: &AuditCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuditCommands::List {
            target,
            action,
            actor,
        } => list::run(
            target.as_deref(),
            action.as_deref(),
            actor.as_deref(),
            ctx,
            flags,
        ),
        AuditCommands::Export { out } => export::run(out.as_deref(), ctx, flags),
    }
}
