//! Tagged action payloads accepted by the transition engine.
//!
//! Each variant carries exactly the fields its action needs, so the engine
//! matches exhaustively instead of probing optional fields.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Case;
use crate::enums::{AuditAction, CaseKind, CaseStatus};

/// One requested change to a case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Approve {
        #[serde(default)]
        note: Option<String>,
    },
    Remove {
        #[serde(default)]
        note: Option<String>,
    },
    Escalate {
        #[serde(default)]
        note: Option<String>,
        #[serde(default)]
        assignee: Option<String>,
    },
    Assign {
        assignee: String,
    },
    AddNote {
        note: String,
    },
    Resolve {
        label: String,
        note: String,
    },
    Dismiss {
        note: String,
    },
    MarkDuplicate {
        duplicate_of: String,
    },
    SetTicketStatus {
        status: CaseStatus,
    },
}

impl Action {
    /// Verb used in error messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "approve",
            Self::Remove { .. } => "remove",
            Self::Escalate { .. } => "escalate",
            Self::Assign { .. } => "assign",
            Self::AddNote { .. } => "add_note",
            Self::Resolve { .. } => "resolve",
            Self::Dismiss { .. } => "dismiss",
            Self::MarkDuplicate { .. } => "mark_duplicate",
            Self::SetTicketStatus { .. } => "set_ticket_status",
        }
    }

    /// Audit action recorded when this action is accepted on a case of `kind`.
    #[must_use]
    pub const fn audit_action(&self, kind: CaseKind) -> AuditAction {
        match self {
            Self::Approve { .. } => AuditAction::ContentApproved,
            Self::Remove { .. } => AuditAction::ContentRemoved,
            Self::Escalate { .. } => match kind {
                CaseKind::UserReport => AuditAction::ReportEscalated,
                CaseKind::ModerationItem | CaseKind::SupportTicket => {
                    AuditAction::ContentEscalated
                }
            },
            Self::Assign { .. } => AuditAction::CaseAssigned,
            Self::AddNote { .. } => AuditAction::NoteAdded,
            Self::Resolve { .. } => AuditAction::ReportResolved,
            Self::Dismiss { .. } => AuditAction::ReportDismissed,
            Self::MarkDuplicate { .. } => AuditAction::ReportDuplicated,
            Self::SetTicketStatus { .. } => AuditAction::TicketStatusChanged,
        }
    }

    /// Free text this action appends to the case notes, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        let note = match self {
            Self::Approve { note } | Self::Remove { note } | Self::Escalate { note, .. } => {
                note.as_deref()
            }
            Self::AddNote { note } | Self::Resolve { note, .. } | Self::Dismiss { note } => {
                Some(note.as_str())
            }
            Self::Assign { .. } | Self::MarkDuplicate { .. } | Self::SetTicketStatus { .. } => {
                None
            }
        };
        note.map(str::trim).filter(|n| !n.is_empty())
    }

    /// Human-readable one-liner for the audit log.
    #[must_use]
    pub fn summary(&self, before: &Case, after: &Case) -> String {
        let id = &after.id;
        match self {
            Self::Approve { .. } => format!("Approved content {id}"),
            Self::Remove { .. } => format!("Removed content {id}"),
            Self::Escalate { assignee, .. } => match assignee.as_deref().map(str::trim) {
                Some(to) if !to.is_empty() => format!("Escalated {} {id} to {to}", after.kind),
                _ => format!("Escalated {} {id}", after.kind),
            },
            Self::Assign { assignee } => format!("Assigned {id} to {}", assignee.trim()),
            Self::AddNote { .. } => format!("Added note to {id}"),
            Self::Resolve { label, .. } => format!("Resolved report {id}: {}", label.trim()),
            Self::Dismiss { .. } => format!("Dismissed report {id}"),
            Self::MarkDuplicate { duplicate_of } => {
                format!("Marked report {id} as duplicate of {}", duplicate_of.trim())
            }
            Self::SetTicketStatus { status } => {
                format!("Moved ticket {id} from {} to {status}", before.status)
            }
        }
    }
}
