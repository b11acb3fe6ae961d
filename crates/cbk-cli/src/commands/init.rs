use std::path::Path;

use serde::Serialize;

use cbk_config::CasebookConfig;
use cbk_store::seed::seed_cases;
use cbk_store::{CaseStore, Workspace};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitResponse {
    workspace: String,
    cases: usize,
    actor: String,
    allow_ticket_reopen: bool,
}

/// Handle `cbk init`.
pub fn handle(
    args: &InitArgs,
    project_root: &Path,
    config: &CasebookConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = CaseStore::from_cases(seed_cases(chrono::Utc::now()))?;
    let workspace = Workspace::init(project_root, &store, args.force)?;

    output(
        &InitResponse {
            workspace: workspace.dir().display().to_string(),
            cases: store.len(),
            actor: config.actor.name.clone(),
            allow_ticket_reopen: config.workflow.allow_ticket_reopen,
        },
        flags.format,
    )
}
