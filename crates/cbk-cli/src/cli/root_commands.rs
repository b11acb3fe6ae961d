use clap::{Args, Subcommand};

use crate::cli::subcommands::AuditCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create a workspace seeded with sample cases.
    Init(InitArgs),
    /// List cases in queue order.
    List(ListArgs),
    /// Show one case.
    Get { id: String },
    /// Approve a moderation item.
    Approve(NoteArgs),
    /// Remove a moderation item.
    Remove(NoteArgs),
    /// Escalate a moderation item or user report.
    Escalate(EscalateArgs),
    /// Assign a case to a team member.
    Assign { id: String, assignee: String },
    /// Append a note to a case.
    Note { id: String, text: String },
    /// Resolve a user report with an action taken.
    Resolve(ResolveArgs),
    /// Dismiss a user report.
    Dismiss(DismissArgs),
    /// Close a user report as a duplicate of another.
    Duplicate(DuplicateArgs),
    /// Move a support ticket to another status.
    #[command(name = "ticket-status")]
    TicketStatus { id: String, status: String },
    /// Case counts by kind and status.
    Stats,
    /// View or export the audit log.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `cbk init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing workspace, discarding its audit log.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `cbk list`.
#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub kind: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for `cbk approve` and `cbk remove`.
#[derive(Clone, Debug, Args)]
pub struct NoteArgs {
    pub id: String,
    #[arg(long)]
    pub note: Option<String>,
}

/// Arguments for `cbk escalate`.
#[derive(Clone, Debug, Args)]
pub struct EscalateArgs {
    pub id: String,
    #[arg(long)]
    pub note: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
}

/// Arguments for `cbk resolve`.
#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    pub id: String,
    /// Action taken, e.g. `warned_user`.
    #[arg(long)]
    pub label: String,
    #[arg(long)]
    pub note: String,
}

/// Arguments for `cbk dismiss`.
#[derive(Clone, Debug, Args)]
pub struct DismissArgs {
    pub id: String,
    #[arg(long)]
    pub note: String,
}

/// Arguments for `cbk duplicate`.
#[derive(Clone, Debug, Args)]
pub struct DuplicateArgs {
    pub id: String,
    /// Id of the original report.
    #[arg(long = "of")]
    pub original: String,
}

/// Arguments for `cbk schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered schema name. Lists names when omitted.
    pub name: Option<String>,
}
