//! Append-only audit recorder.
//!
//! Entries are stored in arrival order and never edited or removed. Reads
//! present them newest first.

use chrono::{DateTime, Utc};

use cbk_core::entities::AuditEntry;
use cbk_core::enums::AuditAction;
use cbk_core::responses::AuditExport;

/// Filter criteria for audit queries.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub target_id: Option<String>,
    pub action: Option<AuditAction>,
    pub actor: Option<String>,
    pub limit: Option<usize>,
}

impl AuditFilter {
    #[must_use]
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        self.target_id
            .as_deref()
            .is_none_or(|t| entry.target_id == t)
            && self.action.is_none_or(|a| entry.action == a)
            && self.actor.as_deref().is_none_or(|a| entry.actor.name == a)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditRecorder {
    entries: Vec<AuditEntry>,
}

impl AuditRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a recorder from entries in arrival order (oldest first).
    #[must_use]
    pub const fn from_entries(entries: Vec<AuditEntry>) -> Self {
        Self { entries }
    }

    /// Append one entry. Recording never fails.
    pub fn record(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Entries matching `filter`, newest first.
    #[must_use]
    pub fn list(&self, filter: &AuditFilter) -> Vec<&AuditEntry> {
        let matched = self.entries.iter().rev().filter(|e| filter.matches(e));
        match filter.limit {
            Some(limit) => matched.take(limit).collect(),
            None => matched.collect(),
        }
    }

    /// Entries in arrival order, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Most recent entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&AuditEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the full log, newest first, stamped with `at`.
    #[must_use]
    pub fn export(&self, at: DateTime<Utc>) -> AuditExport {
        AuditExport::new(at, self.entries.iter().rev().cloned().collect())
    }
}
