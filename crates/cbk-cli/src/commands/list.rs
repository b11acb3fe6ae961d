use cbk_core::enums::{CaseKind, CaseStatus};
use cbk_store::CaseFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cbk list`.
pub fn handle(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = CaseFilter {
        kind: args
            .kind
            .as_deref()
            .map(|value| parse_enum::<CaseKind>(value, "kind"))
            .transpose()?,
        status: args
            .status
            .as_deref()
            .map(|value| parse_enum::<CaseStatus>(value, "status"))
            .transpose()?,
        assignee: args.assignee.clone(),
        search: args.search.clone(),
    };
    let limit = flags.limit.unwrap_or(ctx.config.general.default_limit);

    let cases = ctx.service.list(&filter, Some(usize::try_from(limit)?));
    output(&cases, flags.format)
}
