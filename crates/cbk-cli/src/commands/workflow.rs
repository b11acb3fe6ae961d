//! Handlers for the commands that move a case through its workflow.
//!
//! Each one calls a single `CaseService` action and prints the updated
//! case. A rejected action propagates as an error and nothing is persisted.

use cbk_core::entities::Case;
use cbk_core::enums::CaseStatus;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{
    DismissArgs, DuplicateArgs, EscalateArgs, NoteArgs, ResolveArgs,
};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

fn print(case: &Case, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(case, flags.format)
}

pub fn approve(args: &NoteArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let case = ctx.service.approve(&args.id, args.note.as_deref())?;
    print(&case, flags)
}

pub fn remove(args: &NoteArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let case = ctx.service.remove(&args.id, args.note.as_deref())?;
    print(&case, flags)
}

pub fn escalate(
    args: &EscalateArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let case = ctx
        .service
        .escalate(&args.id, args.note.as_deref(), args.assignee.as_deref())?;
    print(&case, flags)
}

pub fn assign(
    id: &str,
    assignee: &str,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let case = ctx.service.assign(id, assignee)?;
    print(&case, flags)
}

pub fn note(id: &str, text: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let case = ctx.service.add_note(id, text)?;
    print(&case, flags)
}

pub fn resolve(
    args: &ResolveArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let case = ctx.service.resolve(&args.id, &args.label, &args.note)?;
    print(&case, flags)
}

pub fn dismiss(
    args: &DismissArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let case = ctx.service.dismiss(&args.id, &args.note)?;
    print(&case, flags)
}

pub fn duplicate(
    args: &DuplicateArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let case = ctx.service.mark_duplicate(&args.id, &args.original)?;
    print(&case, flags)
}

pub fn ticket_status(
    id: &str,
    status: &str,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = parse_enum::<CaseStatus>(status, "status")?;
    let case = ctx.service.set_ticket_status(id, status)?;
    print(&case, flags)
}
