use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cbk stats`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.service.stats(), flags.format)
}
