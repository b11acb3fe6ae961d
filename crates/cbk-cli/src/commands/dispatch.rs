use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    use commands::workflow;

    match command {
        Commands::List(args) => commands::list::handle(args, ctx, flags),
        Commands::Get { id } => commands::get::handle(id, ctx, flags),
        Commands::Approve(args) => workflow::approve(args, ctx, flags),
        Commands::Remove(args) => workflow::remove(args, ctx, flags),
        Commands::Escalate(args) => workflow::escalate(args, ctx, flags),
        Commands::Assign { id, assignee } => workflow::assign(id, assignee, ctx, flags),
        Commands::Note { id, text } => workflow::note(id, text, ctx, flags),
        Commands::Resolve(args) => workflow::resolve(args, ctx, flags),
        Commands::Dismiss(args) => workflow::dismiss(args, ctx, flags),
        Commands::Duplicate(args) => workflow::duplicate(args, ctx, flags),
        Commands::TicketStatus { id, status } => workflow::ticket_status(id, status, ctx, flags),
        Commands::Stats => commands::stats::handle(ctx, flags),
        Commands::Audit { action } => commands::audit::handle(action, ctx, flags),
        Commands::Init(_) | Commands::Schema(_) => {
            unreachable!("init/schema are pre-dispatched in main")
        }
    }
}
