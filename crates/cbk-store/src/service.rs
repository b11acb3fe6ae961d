//! Service layer driving transitions through the store and audit log.
//!
//! `CaseService` owns a `CaseStore`, an `AuditRecorder`, the active
//! `TransitionPolicy`, and the acting identity. Every action method follows
//! the same protocol:
//! 1. Look up the case
//! 2. Run the transition engine (legality, then payload)
//! 3. Build the audit entry
//! 4. Replace the store record
//! 5. Append the audit entry
//!
//! A rejection at any step before 4 leaves both the store and the log as
//! they were.

use chrono::{DateTime, Utc};

use cbk_core::action::Action;
use cbk_core::audit_detail::details_for;
use cbk_core::clock::{Clock, SystemClock};
use cbk_core::entities::{Actor, AuditEntry, Case};
use cbk_core::enums::{CaseKind, CaseStatus};
use cbk_core::errors::CoreError;
use cbk_core::ids::{PREFIX_AUDIT, generate_id};
use cbk_core::responses::{AuditExport, CaseStats};
use cbk_core::transition::{self, TransitionPolicy};

use crate::audit::{AuditFilter, AuditRecorder};
use crate::store::{CaseFilter, CaseStore};

pub struct CaseService {
    store: CaseStore,
    audit: AuditRecorder,
    policy: TransitionPolicy,
    actor: Actor,
    clock: Box<dyn Clock>,
}

impl CaseService {
    /// Create a service over existing state, stamping time from the wall clock.
    #[must_use]
    pub fn new(
        store: CaseStore,
        audit: AuditRecorder,
        policy: TransitionPolicy,
        actor: Actor,
    ) -> Self {
        Self {
            store,
            audit,
            policy,
            actor,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the time source (for deterministic tests).
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub const fn store(&self) -> &CaseStore {
        &self.store
    }

    #[must_use]
    pub const fn audit(&self) -> &AuditRecorder {
        &self.audit
    }

    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    #[must_use]
    pub const fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Give back the store and recorder, e.g. to persist them.
    #[must_use]
    pub fn into_parts(self) -> (CaseStore, AuditRecorder) {
        (self.store, self.audit)
    }

    // -----------------------------------------------------------------------
    // Core protocol
    // -----------------------------------------------------------------------

    /// Apply one action to the case with `id`.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if no case has `id`.
    /// - `CoreError::IllegalTransition` if the action has no edge from the
    ///   case's current status.
    /// - `CoreError::Validation` if the payload is missing a required field.
    pub fn apply(&mut self, id: &str, action: &Action) -> Result<Case, CoreError> {
        let before = self.store.get(id)?;
        let now = self.clock.now();

        let after = transition::apply(before, action, self.policy, now).inspect_err(|e| {
            tracing::debug!(case = id, action = action.name(), "rejected: {e}");
        })?;

        let entry = AuditEntry {
            id: self.fresh_audit_id()?,
            at: now,
            actor: self.actor.clone(),
            action: action.audit_action(before.kind),
            target_id: before.id.clone(),
            summary: action.summary(before, &after),
            details: Some(details_for(action, before, &after)?),
        };
        let from = before.status;

        self.store.replace(id, after.clone())?;
        self.audit.record(entry);

        tracing::debug!(
            case = id,
            action = action.name(),
            from = %from,
            to = %after.status,
            "transition applied"
        );
        Ok(after)
    }

    /// Audit id not yet present in the recorder.
    fn fresh_audit_id(&self) -> Result<String, CoreError> {
        loop {
            let id = generate_id(PREFIX_AUDIT)?;
            if !self.audit.contains_id(&id) {
                return Ok(id);
            }
            tracing::debug!(id, "audit id collision, regenerating");
        }
    }

    // -----------------------------------------------------------------------
    // Action API
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// See [`Self::apply`].
    pub fn approve(&mut self, id: &str, note: Option<&str>) -> Result<Case, CoreError> {
        self.apply(
            id,
            &Action::Approve {
                note: note.map(String::from),
            },
        )
    }

    /// # Errors
    ///
    /// See [`Self::apply`].
    pub fn remove(&mut self, id: &str, note: Option<&str>) -> Result<Case, CoreError> {
        self.apply(
            id,
            &Action::Remove {
                note: note.map(String::from),
            },
        )
    }

    /// Escalate a moderation item, or flag a report for escalation without
    /// changing its status. An assignee, when given, takes over the case.
    ///
    /// # Errors
    ///
    /// See [`Self::apply`].
    pub fn escalate(
        &mut self,
        id: &str,
        note: Option<&str>,
        assignee: Option<&str>,
    ) -> Result<Case, CoreError> {
        self.apply(
            id,
            &Action::Escalate {
                note: note.map(String::from),
                assignee: assignee.map(String::from),
            },
        )
    }

    /// # Errors
    ///
    /// See [`Self::apply`].
    pub fn assign(&mut self, id: &str, assignee: &str) -> Result<Case, CoreError> {
        self.apply(
            id,
            &Action::Assign {
                assignee: assignee.to_string(),
            },
        )
    }

    /// # Errors
    ///
    /// See [`Self::apply`].
    pub fn add_note(&mut self, id: &str, note: &str) -> Result<Case, CoreError> {
        self.apply(
            id,
            &Action::AddNote {
                note: note.to_string(),
            },
        )
    }

    /// # Errors
    ///
    /// See [`Self::apply`].
    pub fn resolve(&mut self, id: &str, label: &str, note: &str) -> Result<Case, CoreError> {
        self.apply(
            id,
            &Action::Resolve {
                label: label.to_string(),
                note: note.to_string(),
            },
        )
    }

    /// # Errors
    ///
    /// See [`Self::apply`].
    pub fn dismiss(&mut self, id: &str, note: &str) -> Result<Case, CoreError> {
        self.apply(
            id,
            &Action::Dismiss {
                note: note.to_string(),
            },
        )
    }

    /// Close a report as a duplicate of another report in the store.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` if `duplicate_of` names no case, otherwise see
    /// [`Self::apply`].
    pub fn mark_duplicate(&mut self, id: &str, duplicate_of: &str) -> Result<Case, CoreError> {
        let action = Action::MarkDuplicate {
            duplicate_of: duplicate_of.trim().to_string(),
        };
        // Legality wins over a dangling reference.
        transition::next_status(self.store.get(id)?, &action, self.policy)?;
        let original = duplicate_of.trim();
        if !original.is_empty() && original != id {
            let other = self.store.get(original)?;
            if other.kind != CaseKind::UserReport {
                return Err(CoreError::Validation(format!(
                    "{original} is a {}, not a user report",
                    other.kind
                )));
            }
        }
        self.apply(id, &action)
    }

    /// # Errors
    ///
    /// See [`Self::apply`].
    pub fn set_ticket_status(&mut self, id: &str, status: CaseStatus) -> Result<Case, CoreError> {
        self.apply(id, &Action::SetTicketStatus { status })
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no case has `id`.
    pub fn get(&self, id: &str) -> Result<&Case, CoreError> {
        self.store.get(id)
    }

    /// Filtered cases in queue order, truncated to `limit`.
    #[must_use]
    pub fn list(&self, filter: &CaseFilter, limit: Option<usize>) -> Vec<&Case> {
        let mut cases = self.store.queue(filter);
        if let Some(limit) = limit {
            cases.truncate(limit);
        }
        cases
    }

    #[must_use]
    pub fn audit_log(&self, filter: &AuditFilter) -> Vec<&AuditEntry> {
        self.audit.list(filter)
    }

    /// Snapshot of the audit log stamped with the current time.
    #[must_use]
    pub fn export(&self) -> AuditExport {
        self.audit.export(self.clock.now())
    }

    #[must_use]
    pub fn stats(&self) -> CaseStats {
        self.store.stats()
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Add a new case to the store. Not audited.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` on a duplicate id or inconsistent record.
    pub fn insert(&mut self, case: Case) -> Result<(), CoreError> {
        self.store.insert(case)
    }
}
