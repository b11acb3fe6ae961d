use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CaseKind, CaseStatus, Severity};
use crate::errors::CoreError;

/// A unit of review work: a moderation item, a user report, or a support ticket.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub kind: CaseKind,
    pub status: CaseStatus,
    pub severity: Severity,
    /// Subject line shown in the queue and matched by text search.
    pub title: String,
    #[serde(default)]
    pub reported_by: Option<String>,
    /// Team member id. Lookup only, the store does not own members.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Append-only.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Outcome label set by resolve or duplicate marking.
    #[serde(default)]
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// A new case in its kind's initial status.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: CaseKind,
        severity: Severity,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            status: kind.initial_status(),
            severity,
            title: title.into(),
            reported_by: None,
            assigned_to: None,
            notes: Vec::new(),
            resolution: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: impl Into<String>) -> Self {
        self.reported_by = Some(reporter.into());
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal(self.status)
    }

    /// Check that the record is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the id is blank or the status does
    /// not belong to the case's kind.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("case id must not be empty".into()));
        }
        if !self.kind.allows(self.status) {
            return Err(CoreError::Validation(format!(
                "status {} is not valid for {} {}",
                self.status, self.kind, self.id
            )));
        }
        Ok(())
    }

    /// Case-insensitive match against id, title, reporter, and notes.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.id.to_lowercase().contains(&needle)
            || self.title.to_lowercase().contains(&needle)
            || self
                .reported_by
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains(&needle))
            || self.notes.iter().any(|n| n.to_lowercase().contains(&needle))
    }
}
