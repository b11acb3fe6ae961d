use clap::Subcommand;

/// Audit log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// List audit entries, newest first.
    List {
        /// Only entries targeting this case id.
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        action: Option<String>,
        /// Only entries by this actor name.
        #[arg(long)]
        actor: Option<String>,
    },
    /// Write the full log to `audit-log-<millis>.json`.
    Export {
        /// Destination directory (defaults to `export.dir` from config).
        #[arg(long)]
        out: Option<String>,
    },
}
