//! Case kinds, statuses, severities, roles, and audit actions for Casebook.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `CaseStatus` is shared across kinds; `CaseKind` owns the per-kind status
//! set and `CaseStatus::allowed_next_states()` encodes the per-kind edges.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// CaseKind
// ---------------------------------------------------------------------------

/// Which review queue a case belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    ModerationItem,
    UserReport,
    SupportTicket,
}

impl CaseKind {
    pub const ALL: [Self; 3] = [Self::ModerationItem, Self::UserReport, Self::SupportTicket];

    /// Every status a case of this kind may hold.
    #[must_use]
    pub const fn statuses(self) -> &'static [CaseStatus] {
        match self {
            Self::ModerationItem => &[
                CaseStatus::Pending,
                CaseStatus::Reviewing,
                CaseStatus::Escalated,
                CaseStatus::Approved,
                CaseStatus::Removed,
            ],
            Self::UserReport => &[
                CaseStatus::New,
                CaseStatus::InReview,
                CaseStatus::ActionTaken,
                CaseStatus::NoAction,
                CaseStatus::Duplicate,
            ],
            Self::SupportTicket => &[
                CaseStatus::Open,
                CaseStatus::Pending,
                CaseStatus::Resolved,
                CaseStatus::Closed,
            ],
        }
    }

    /// Status a freshly created case of this kind starts in.
    #[must_use]
    pub const fn initial_status(self) -> CaseStatus {
        match self {
            Self::ModerationItem => CaseStatus::Pending,
            Self::UserReport => CaseStatus::New,
            Self::SupportTicket => CaseStatus::Open,
        }
    }

    /// Whether `status` belongs to this kind's status set.
    #[must_use]
    pub fn allows(self, status: CaseStatus) -> bool {
        self.statuses().contains(&status)
    }

    /// Hard terminal states: no action of any sort is accepted from them.
    ///
    /// Support tickets have none; `closed` is only a soft lock on reopening.
    #[must_use]
    pub const fn is_terminal(self, status: CaseStatus) -> bool {
        match self {
            Self::ModerationItem => matches!(status, CaseStatus::Approved | CaseStatus::Removed),
            Self::UserReport => matches!(
                status,
                CaseStatus::ActionTaken | CaseStatus::NoAction | CaseStatus::Duplicate
            ),
            Self::SupportTicket => false,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModerationItem => "moderation_item",
            Self::UserReport => "user_report",
            Self::SupportTicket => "support_ticket",
        }
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown case kind '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// CaseStatus
// ---------------------------------------------------------------------------

/// Status of a case. Which variants are valid depends on the case kind.
///
/// ```text
/// moderation_item: pending ──┬─→ reviewing ─┬─→ approved
///                            │              ├─→ removed
///                            └──────────────┴─→ escalated
///
/// user_report:     new ──┬─→ in_review ─┬─→ action_taken
///                        │              ├─→ no_action
///                        └──────────────┴─→ duplicate
///
/// support_ticket:  open ⇄ pending ⇄ resolved → closed (reopen is policy)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pending,
    Reviewing,
    Escalated,
    Approved,
    Removed,
    New,
    InReview,
    ActionTaken,
    NoAction,
    Duplicate,
    Open,
    Resolved,
    Closed,
}

impl CaseStatus {
    pub const ALL: [Self; 13] = [
        Self::Pending,
        Self::Reviewing,
        Self::Escalated,
        Self::Approved,
        Self::Removed,
        Self::New,
        Self::InReview,
        Self::ActionTaken,
        Self::NoAction,
        Self::Duplicate,
        Self::Open,
        Self::Resolved,
        Self::Closed,
    ];

    /// Valid next states from the current state for a case of `kind`.
    ///
    /// Reopening a closed ticket is not listed here; the transition engine
    /// adds those edges only when the reopen policy is enabled.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self, kind: CaseKind) -> &'static [Self] {
        match kind {
            CaseKind::ModerationItem => match self {
                Self::Pending => &[
                    Self::Reviewing,
                    Self::Approved,
                    Self::Removed,
                    Self::Escalated,
                ],
                Self::Reviewing => &[Self::Approved, Self::Removed, Self::Escalated],
                _ => &[],
            },
            CaseKind::UserReport => match self {
                Self::New => &[
                    Self::InReview,
                    Self::ActionTaken,
                    Self::NoAction,
                    Self::Duplicate,
                ],
                Self::InReview => &[Self::ActionTaken, Self::NoAction, Self::Duplicate],
                _ => &[],
            },
            CaseKind::SupportTicket => match self {
                Self::Open => &[Self::Pending, Self::Resolved, Self::Closed],
                Self::Pending => &[Self::Open, Self::Resolved, Self::Closed],
                Self::Resolved => &[Self::Open, Self::Pending, Self::Closed],
                _ => &[],
            },
        }
    }

    /// Check whether transitioning to `next` is allowed for a case of `kind`.
    #[must_use]
    pub fn can_transition_to(self, kind: CaseKind, next: Self) -> bool {
        self.allowed_next_states(kind).contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewing => "reviewing",
            Self::Escalated => "escalated",
            Self::Approved => "approved",
            Self::Removed => "removed",
            Self::New => "new",
            Self::InReview => "in_review",
            Self::ActionTaken => "action_taken",
            Self::NoAction => "no_action",
            Self::Duplicate => "duplicate",
            Self::Open => "open",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown case status '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Ordinal classification used for queue ordering. Support tickets call this
/// priority; the scale is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Sort rank, higher is more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Team role of the actor performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Moderator,
    Support,
    Viewer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Support => "support",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ContentApproved,
    ContentRemoved,
    ContentEscalated,
    CaseAssigned,
    NoteAdded,
    ReportResolved,
    ReportDismissed,
    ReportEscalated,
    ReportDuplicated,
    TicketStatusChanged,
}

impl AuditAction {
    pub const ALL: [Self; 10] = [
        Self::ContentApproved,
        Self::ContentRemoved,
        Self::ContentEscalated,
        Self::CaseAssigned,
        Self::NoteAdded,
        Self::ReportResolved,
        Self::ReportDismissed,
        Self::ReportEscalated,
        Self::ReportDuplicated,
        Self::TicketStatusChanged,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContentApproved => "content_approved",
            Self::ContentRemoved => "content_removed",
            Self::ContentEscalated => "content_escalated",
            Self::CaseAssigned => "case_assigned",
            Self::NoteAdded => "note_added",
            Self::ReportResolved => "report_resolved",
            Self::ReportDismissed => "report_dismissed",
            Self::ReportEscalated => "report_escalated",
            Self::ReportDuplicated => "report_duplicated",
            Self::TicketStatusChanged => "ticket_status_changed",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown audit action '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
