use cbk_core::enums::AuditAction;
use cbk_store::AuditFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub fn run(
    target: Option<&str>,
    action: Option<&str>,
    actor: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = flags.limit.unwrap_or(ctx.config.general.default_limit);
    let filter = AuditFilter {
        target_id: target.map(String::from),
        action: action
            .map(|value| parse_enum::<AuditAction>(value, "action"))
            .transpose()?,
        actor: actor.map(String::from),
        limit: Some(usize::try_from(limit)?),
    };

    output(&ctx.service.audit_log(&filter), flags.format)
}
