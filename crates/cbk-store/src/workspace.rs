//! On-disk workspace: keeps a session alive between `cbk` invocations.
//!
//! Layout under `<project>/.casebook/`:
//! - `cases.json`: pretty-printed array of every case, insertion order.
//! - `audit.jsonl`: one audit entry per line, oldest first. Only appended.
//!
//! Loading validates each record against its schema. Validation is
//! warn-only; deserialization errors are fatal.

use std::path::{Path, PathBuf};

use cbk_core::entities::{AuditEntry, Case};
use cbk_schema::SchemaRegistry;

use crate::audit::AuditRecorder;
use crate::error::StoreError;
use crate::store::CaseStore;

pub const WORKSPACE_DIR: &str = ".casebook";
pub const CASES_FILE: &str = "cases.json";
pub const AUDIT_FILE: &str = "audit.jsonl";

#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Workspace handle for `project_root`, whether or not it exists yet.
    #[must_use]
    pub fn at(project_root: &Path) -> Self {
        Self {
            dir: project_root.join(WORKSPACE_DIR),
        }
    }

    /// Open an existing workspace.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotInitialized` if `cases.json` is missing.
    pub fn open(project_root: &Path) -> Result<Self, StoreError> {
        let ws = Self::at(project_root);
        if !ws.is_initialized() {
            return Err(StoreError::NotInitialized(ws.dir));
        }
        Ok(ws)
    }

    /// Create a workspace holding `cases` and an empty audit log.
    ///
    /// With `force`, an existing workspace is overwritten, audit log included.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyInitialized` if a workspace exists and
    /// `force` is false, or `StoreError::Io` if the files cannot be written.
    pub fn init(project_root: &Path, cases: &CaseStore, force: bool) -> Result<Self, StoreError> {
        let ws = Self::at(project_root);
        if ws.is_initialized() && !force {
            return Err(StoreError::AlreadyInitialized(ws.dir));
        }
        std::fs::create_dir_all(&ws.dir).map_err(|e| StoreError::io(&ws.dir, e))?;
        ws.save_cases(cases)?;
        let audit_path = ws.audit_path();
        std::fs::write(&audit_path, b"").map_err(|e| StoreError::io(&audit_path, e))?;
        tracing::debug!(dir = %ws.dir.display(), cases = cases.len(), "workspace initialized");
        Ok(ws)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cases_path().is_file()
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn cases_path(&self) -> PathBuf {
        self.dir.join(CASES_FILE)
    }

    #[must_use]
    pub fn audit_path(&self) -> PathBuf {
        self.dir.join(AUDIT_FILE)
    }

    // -----------------------------------------------------------------------
    // Cases
    // -----------------------------------------------------------------------

    /// Read the case snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` or `StoreError::Json` if the file cannot be
    /// read or parsed, or `StoreError::Core` if records collide or carry a
    /// status foreign to their kind.
    pub fn load_cases(&self, schema: &SchemaRegistry) -> Result<CaseStore, StoreError> {
        let path = self.cases_path();
        let raw = std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let values: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|e| StoreError::json(&path, e))?;

        let mut cases = Vec::with_capacity(values.len());
        for value in values {
            if let Err(e) = schema.validate("case", &value) {
                tracing::warn!(
                    "Case snapshot validation failed for {}: {e}",
                    value["id"].as_str().unwrap_or("<no id>")
                );
            }
            let case: Case = serde_json::from_value(value).map_err(|e| StoreError::json(&path, e))?;
            cases.push(case);
        }
        Ok(CaseStore::from_cases(cases)?)
    }

    /// Replace the case snapshot atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn save_cases(&self, store: &CaseStore) -> Result<(), StoreError> {
        let path = self.cases_path();
        let cases: Vec<&Case> = store.iter().collect();
        let json = serde_json::to_string_pretty(&cases).map_err(|e| StoreError::json(&path, e))?;

        // Write beside the snapshot, then rename over it, so a reader never
        // sees a half-written file.
        let staged = self.dir.join(format!("{CASES_FILE}.tmp"));
        std::fs::write(&staged, json).map_err(|e| StoreError::io(&staged, e))?;
        if let Err(e) = std::fs::rename(&staged, &path) {
            let _ = std::fs::remove_file(&staged);
            return Err(StoreError::io(&path, e));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Audit log
    // -----------------------------------------------------------------------

    /// Read every audit entry, oldest first. A missing file is an empty log.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if a line is not JSON, or `StoreError::Json`
    /// if it is JSON but not an audit entry.
    pub fn load_audit(&self, schema: &SchemaRegistry) -> Result<AuditRecorder, StoreError> {
        let path = self.audit_path();
        if !path.exists() {
            return Ok(AuditRecorder::new());
        }
        let values: Vec<serde_json::Value> = serde_jsonlines::json_lines(&path)
            .map_err(|e| StoreError::io(&path, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::io(&path, e))?;

        let mut entries = Vec::with_capacity(values.len());
        for (line, value) in values.into_iter().enumerate() {
            check_audit_line(schema, line + 1, &value);
            let entry: AuditEntry =
                serde_json::from_value(value).map_err(|e| StoreError::json(&path, e))?;
            entries.push(entry);
        }
        Ok(AuditRecorder::from_entries(entries))
    }

    /// Append entries to the audit log.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the write fails.
    pub fn append_audit(&self, entries: &[AuditEntry]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }
        let path = self.audit_path();
        serde_jsonlines::append_json_lines(&path, entries).map_err(|e| StoreError::io(&path, e))
    }

    /// Persist a session: replace the case snapshot, then append the audit
    /// entries recorded after the first `persisted` ones.
    ///
    /// The audit log is only touched once the snapshot is in place, so a
    /// failed commit never leaves entries for transitions the snapshot lacks.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if either file cannot be written.
    pub fn commit(
        &self,
        store: &CaseStore,
        audit: &AuditRecorder,
        persisted: usize,
    ) -> Result<(), StoreError> {
        self.save_cases(store)?;
        let fresh = audit.entries().get(persisted..).unwrap_or_default();
        self.append_audit(fresh)
    }
}

/// Validate one raw audit line. Returns whether it matched the schema;
/// mismatches are logged and left to deserialization to reject.
fn check_audit_line(schema: &SchemaRegistry, line: usize, value: &serde_json::Value) -> bool {
    match schema.validate("audit_entry", value) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                "Audit log validation failed at line {line} ({}): {e}",
                value["id"].as_str().unwrap_or("<no id>")
            );
            false
        }
    }
}
