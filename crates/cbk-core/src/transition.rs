//! Transition engine: pure functions from (case, action) to the next case.
//!
//! Checks run in a fixed order. Legality first: terminal cases reject every
//! action, and the action must have an edge from the current status for the
//! case's kind. Payload validation second. Only then is a new `Case` built;
//! the input is never touched.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::entities::Case;
use crate::enums::{CaseKind, CaseStatus};
use crate::errors::CoreError;

/// Knobs that change the legal-transition table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TransitionPolicy {
    /// Let a closed support ticket move back to open, pending, or resolved.
    #[serde(default)]
    pub allow_ticket_reopen: bool,
}

/// What an action does to the status before edge checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Move to a status; requires an edge in the table.
    To(CaseStatus),
    /// Side-channel action that keeps the current status.
    Stay,
}

/// Apply `action` to `case`, returning the updated copy.
///
/// # Errors
///
/// - `CoreError::IllegalTransition` if the case is terminal, the action does
///   not apply to the case's kind, or there is no edge from the current status.
/// - `CoreError::Validation` if a required note, label, or assignee is blank.
pub fn apply(
    case: &Case,
    action: &Action,
    policy: TransitionPolicy,
    now: DateTime<Utc>,
) -> Result<Case, CoreError> {
    let next = next_status(case, action, policy)?;
    validate_payload(case, action)?;

    let mut updated = case.clone();
    updated.status = next;
    updated.updated_at = now;
    if let Some(note) = action.note() {
        updated.notes.push(note.to_string());
    }

    match action {
        Action::Assign { assignee } => updated.assigned_to = Some(assignee.trim().to_string()),
        Action::Escalate {
            assignee: Some(assignee),
            ..
        } if !assignee.trim().is_empty() => {
            updated.assigned_to = Some(assignee.trim().to_string());
        }
        Action::Resolve { label, .. } => updated.resolution = Some(label.trim().to_string()),
        Action::MarkDuplicate { duplicate_of } => {
            updated.resolution = Some(format!("duplicate_of:{}", duplicate_of.trim()));
        }
        _ => {}
    }

    Ok(updated)
}

/// Resolve the status `action` would leave `case` in, without validating the payload.
///
/// # Errors
///
/// Returns `CoreError::IllegalTransition` when no edge exists.
pub fn next_status(
    case: &Case,
    action: &Action,
    policy: TransitionPolicy,
) -> Result<CaseStatus, CoreError> {
    if case.is_terminal() {
        return Err(illegal(case, action));
    }

    let current = case.status;
    let step = match (case.kind, action) {
        (CaseKind::ModerationItem, Action::Approve { .. }) => Step::To(CaseStatus::Approved),
        (CaseKind::ModerationItem, Action::Remove { .. }) => Step::To(CaseStatus::Removed),
        (CaseKind::ModerationItem, Action::Escalate { .. }) => Step::To(CaseStatus::Escalated),
        (CaseKind::ModerationItem, Action::Assign { .. }) if current == CaseStatus::Pending => {
            Step::To(CaseStatus::Reviewing)
        }
        (CaseKind::UserReport, Action::Resolve { .. }) => Step::To(CaseStatus::ActionTaken),
        (CaseKind::UserReport, Action::Dismiss { .. }) => Step::To(CaseStatus::NoAction),
        (CaseKind::UserReport, Action::MarkDuplicate { .. }) => Step::To(CaseStatus::Duplicate),
        (CaseKind::UserReport, Action::Assign { .. }) if current == CaseStatus::New => {
            Step::To(CaseStatus::InReview)
        }
        (CaseKind::SupportTicket, Action::SetTicketStatus { status }) => Step::To(*status),
        (_, Action::Assign { .. } | Action::AddNote { .. })
        | (CaseKind::UserReport, Action::Escalate { .. }) => Step::Stay,
        _ => return Err(illegal(case, action)),
    };

    match step {
        Step::Stay => Ok(current),
        Step::To(target) if has_edge(case.kind, current, target, policy) => Ok(target),
        Step::To(_) => Err(illegal(case, action)),
    }
}

/// Whether the table (plus policy) has an edge `from -> to` for `kind`.
#[must_use]
pub fn has_edge(kind: CaseKind, from: CaseStatus, to: CaseStatus, policy: TransitionPolicy) -> bool {
    if from.can_transition_to(kind, to) {
        return true;
    }
    policy.allow_ticket_reopen
        && kind == CaseKind::SupportTicket
        && from == CaseStatus::Closed
        && matches!(
            to,
            CaseStatus::Open | CaseStatus::Pending | CaseStatus::Resolved
        )
}

fn validate_payload(case: &Case, action: &Action) -> Result<(), CoreError> {
    match action {
        Action::Assign { assignee } => require(assignee, "assign requires an assignee"),
        Action::AddNote { note } => require(note, "note must not be empty"),
        Action::Resolve { label, note } => {
            require(label, "resolve requires an action label")?;
            require(note, "resolve requires a note")
        }
        Action::Dismiss { note } => require(note, "dismiss requires a note"),
        Action::MarkDuplicate { duplicate_of } => {
            require(duplicate_of, "duplicate marking requires the original report id")?;
            if duplicate_of.trim() == case.id {
                return Err(CoreError::Validation(format!(
                    "report {} cannot duplicate itself",
                    case.id
                )));
            }
            Ok(())
        }
        Action::Approve { .. }
        | Action::Remove { .. }
        | Action::Escalate { .. }
        | Action::SetTicketStatus { .. } => Ok(()),
    }
}

fn require(value: &str, message: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}

fn illegal(case: &Case, action: &Action) -> CoreError {
    CoreError::IllegalTransition {
        kind: case.kind.to_string(),
        id: case.id.clone(),
        status: case.status.to_string(),
        action: action.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::enums::Severity;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn case(kind: CaseKind, status: CaseStatus) -> Case {
        Case::new("c1", kind, Severity::High, "sample", t0()).with_status(status)
    }

    fn note(text: &str) -> Option<String> {
        Some(text.to_string())
    }

    fn sample_actions() -> Vec<Action> {
        vec![
            Action::Approve { note: None },
            Action::Remove { note: note("spam") },
            Action::Escalate {
                note: None,
                assignee: note("tm-lead"),
            },
            Action::Assign {
                assignee: "tm-1".into(),
            },
            Action::AddNote {
                note: "checked history".into(),
            },
            Action::Resolve {
                label: "warned".into(),
                note: "first strike".into(),
            },
            Action::Dismiss {
                note: "not a violation".into(),
            },
            Action::MarkDuplicate {
                duplicate_of: "c0".into(),
            },
            Action::SetTicketStatus {
                status: CaseStatus::Resolved,
            },
            Action::SetTicketStatus {
                status: CaseStatus::Open,
            },
        ]
    }

    #[rstest]
    #[case(CaseKind::ModerationItem, CaseStatus::Pending, Action::Approve { note: None }, CaseStatus::Approved)]
    #[case(CaseKind::ModerationItem, CaseStatus::Reviewing, Action::Remove { note: None }, CaseStatus::Removed)]
    #[case(CaseKind::ModerationItem, CaseStatus::Pending, Action::Escalate { note: None, assignee: None }, CaseStatus::Escalated)]
    #[case(CaseKind::ModerationItem, CaseStatus::Pending, Action::Assign { assignee: "tm-1".into() }, CaseStatus::Reviewing)]
    #[case(CaseKind::ModerationItem, CaseStatus::Escalated, Action::AddNote { note: "ping".into() }, CaseStatus::Escalated)]
    #[case(CaseKind::UserReport, CaseStatus::New, Action::Assign { assignee: "tm-1".into() }, CaseStatus::InReview)]
    #[case(CaseKind::UserReport, CaseStatus::InReview, Action::Assign { assignee: "tm-2".into() }, CaseStatus::InReview)]
    #[case(CaseKind::UserReport, CaseStatus::New, Action::Resolve { label: "banned".into(), note: "ok".into() }, CaseStatus::ActionTaken)]
    #[case(CaseKind::UserReport, CaseStatus::InReview, Action::Dismiss { note: "fine".into() }, CaseStatus::NoAction)]
    #[case(CaseKind::UserReport, CaseStatus::InReview, Action::Escalate { note: None, assignee: None }, CaseStatus::InReview)]
    #[case(CaseKind::UserReport, CaseStatus::New, Action::MarkDuplicate { duplicate_of: "r0".into() }, CaseStatus::Duplicate)]
    #[case(CaseKind::SupportTicket, CaseStatus::Open, Action::SetTicketStatus { status: CaseStatus::Pending }, CaseStatus::Pending)]
    #[case(CaseKind::SupportTicket, CaseStatus::Resolved, Action::SetTicketStatus { status: CaseStatus::Open }, CaseStatus::Open)]
    #[case(CaseKind::SupportTicket, CaseStatus::Closed, Action::AddNote { note: "late reply".into() }, CaseStatus::Closed)]
    fn legal_transitions(
        #[case] kind: CaseKind,
        #[case] from: CaseStatus,
        #[case] action: Action,
        #[case] expected: CaseStatus,
    ) {
        let before = case(kind, from);
        let after = apply(&before, &action, TransitionPolicy::default(), t0() + Duration::minutes(1))
            .unwrap();
        assert_eq!(after.status, expected);
        assert!(after.updated_at > before.updated_at);
    }

    #[rstest]
    #[case(CaseKind::ModerationItem, CaseStatus::Approved, Action::Remove { note: None })]
    #[case(CaseKind::ModerationItem, CaseStatus::Removed, Action::AddNote { note: "x".into() })]
    #[case(CaseKind::ModerationItem, CaseStatus::Escalated, Action::Approve { note: None })]
    #[case(CaseKind::ModerationItem, CaseStatus::Escalated, Action::Escalate { note: None, assignee: None })]
    #[case(CaseKind::ModerationItem, CaseStatus::Pending, Action::Resolve { label: "l".into(), note: "n".into() })]
    #[case(CaseKind::UserReport, CaseStatus::New, Action::Approve { note: None })]
    #[case(CaseKind::UserReport, CaseStatus::NoAction, Action::Assign { assignee: "tm-1".into() })]
    #[case(CaseKind::SupportTicket, CaseStatus::Open, Action::SetTicketStatus { status: CaseStatus::Open })]
    #[case(CaseKind::SupportTicket, CaseStatus::Closed, Action::SetTicketStatus { status: CaseStatus::Open })]
    #[case(CaseKind::SupportTicket, CaseStatus::Open, Action::SetTicketStatus { status: CaseStatus::Approved })]
    #[case(CaseKind::SupportTicket, CaseStatus::Open, Action::Dismiss { note: "n".into() })]
    fn illegal_transitions(
        #[case] kind: CaseKind,
        #[case] from: CaseStatus,
        #[case] action: Action,
    ) {
        let before = case(kind, from);
        let err = apply(&before, &action, TransitionPolicy::default(), t0()).unwrap_err();
        assert!(err.is_illegal_transition(), "{err}");
    }

    #[test]
    fn reopen_policy_unlocks_closed_tickets() {
        let closed = case(CaseKind::SupportTicket, CaseStatus::Closed);
        let reopen = Action::SetTicketStatus {
            status: CaseStatus::Open,
        };
        let policy = TransitionPolicy {
            allow_ticket_reopen: true,
        };
        let reopened = apply(&closed, &reopen, policy, t0()).unwrap();
        assert_eq!(reopened.status, CaseStatus::Open);
    }

    #[test]
    fn resolve_with_empty_note_is_validation_error() {
        let before = case(CaseKind::UserReport, CaseStatus::New);
        let action = Action::Resolve {
            label: "warned".into(),
            note: String::new(),
        };
        let err = apply(&before, &action, TransitionPolicy::default(), t0()).unwrap_err();
        assert!(err.is_validation(), "{err}");
    }

    #[test]
    fn resolve_with_blank_label_is_validation_error() {
        let before = case(CaseKind::UserReport, CaseStatus::InReview);
        let action = Action::Resolve {
            label: "   ".into(),
            note: "done".into(),
        };
        assert!(
            apply(&before, &action, TransitionPolicy::default(), t0())
                .unwrap_err()
                .is_validation()
        );
    }

    #[test]
    fn legality_is_checked_before_payload() {
        let approved = case(CaseKind::ModerationItem, CaseStatus::Approved);
        let err = apply(
            &approved,
            &Action::AddNote {
                note: String::new(),
            },
            TransitionPolicy::default(),
            t0(),
        )
        .unwrap_err();
        assert!(err.is_illegal_transition());
    }

    #[test]
    fn report_cannot_duplicate_itself() {
        let before = case(CaseKind::UserReport, CaseStatus::New);
        let err = apply(
            &before,
            &Action::MarkDuplicate {
                duplicate_of: "c1".into(),
            },
            TransitionPolicy::default(),
            t0(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn rejection_leaves_input_untouched_and_repeats() {
        let before = case(CaseKind::ModerationItem, CaseStatus::Approved);
        let snapshot = serde_json::to_string(&before).unwrap();
        let action = Action::Remove { note: note("again") };

        let first = apply(&before, &action, TransitionPolicy::default(), t0()).unwrap_err();
        let second = apply(&before, &action, TransitionPolicy::default(), t0()).unwrap_err();

        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(serde_json::to_string(&before).unwrap(), snapshot);
    }

    #[test]
    fn applied_payload_updates_notes_assignee_and_resolution() {
        let before = case(CaseKind::UserReport, CaseStatus::InReview);
        let after = apply(
            &before,
            &Action::Resolve {
                label: " suspended ".into(),
                note: " 7 day suspension ".into(),
            },
            TransitionPolicy::default(),
            t0(),
        )
        .unwrap();
        assert_eq!(after.notes, vec!["7 day suspension".to_string()]);
        assert_eq!(after.resolution.as_deref(), Some("suspended"));

        let escalated = apply(
            &before,
            &Action::Escalate {
                note: None,
                assignee: note("tm-lead"),
            },
            TransitionPolicy::default(),
            t0(),
        )
        .unwrap();
        assert_eq!(escalated.status, CaseStatus::InReview);
        assert_eq!(escalated.assigned_to.as_deref(), Some("tm-lead"));
        assert!(escalated.notes.is_empty());
    }

    #[test]
    fn every_result_is_reachable_through_the_table() {
        let policy = TransitionPolicy::default();
        for kind in CaseKind::ALL {
            for status in kind.statuses() {
                let before = case(kind, *status);
                for action in sample_actions() {
                    match apply(&before, &action, policy, t0()) {
                        Ok(after) => {
                            assert!(kind.allows(after.status));
                            assert!(
                                after.status == before.status
                                    || has_edge(kind, before.status, after.status, policy),
                                "{kind}: {} -> {} via {}",
                                before.status,
                                after.status,
                                action.name()
                            );
                        }
                        Err(err) => assert!(err.is_illegal_transition() || err.is_validation()),
                    }
                }
            }
        }
    }

    #[test]
    fn moderation_terminal_states_reject_everything() {
        for status in [CaseStatus::Approved, CaseStatus::Removed] {
            let before = case(CaseKind::ModerationItem, status);
            for action in sample_actions() {
                let err = apply(&before, &action, TransitionPolicy::default(), t0()).unwrap_err();
                assert!(err.is_illegal_transition(), "{status}: {}", action.name());
            }
        }
    }
}
