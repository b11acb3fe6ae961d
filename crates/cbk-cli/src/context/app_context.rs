use std::path::PathBuf;

use anyhow::Context;
use cbk_config::CasebookConfig;
use cbk_schema::SchemaRegistry;
use cbk_store::{CaseService, Workspace};

/// Session state loaded from the workspace at startup.
pub struct AppContext {
    pub service: CaseService,
    pub config: CasebookConfig,
    pub workspace: Workspace,
    pub project_root: PathBuf,
    /// Audit entries already on disk when the session opened.
    persisted: usize,
}

impl AppContext {
    /// Load the case snapshot and audit log for `project_root`.
    pub fn init(project_root: PathBuf, config: CasebookConfig) -> anyhow::Result<Self> {
        let workspace = Workspace::open(&project_root)?;
        let schema = SchemaRegistry::new();

        let store = workspace
            .load_cases(&schema)
            .context("failed to load case snapshot")?;
        let audit = workspace
            .load_audit(&schema)
            .context("failed to load audit log")?;
        let persisted = audit.len();

        let actor = config.actor.actor()?;
        let service = CaseService::new(store, audit, config.workflow.policy(), actor);

        tracing::debug!(
            root = %project_root.display(),
            cases = service.store().len(),
            audit = persisted,
            "session opened"
        );

        Ok(Self {
            service,
            config,
            workspace,
            project_root,
            persisted,
        })
    }

    /// Whether this session recorded actions not yet written to disk.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.service.audit().len() > self.persisted
    }

    /// Write the snapshot and append new audit entries, if anything changed.
    pub fn commit(&mut self) -> anyhow::Result<()> {
        if !self.is_dirty() {
            return Ok(());
        }
        self.workspace
            .commit(self.service.store(), self.service.audit(), self.persisted)
            .context("failed to persist session")?;
        self.persisted = self.service.audit().len();
        Ok(())
    }
}
