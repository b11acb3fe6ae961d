//! Typed audit detail payloads.
//!
//! Audit entries carry an opaque `details` JSON map. These types give that
//! map a fixed shape per action family and a schema for validation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::entities::Case;
use crate::enums::CaseStatus;
use crate::errors::CoreError;

/// Detail for status-bearing actions (approve, remove, escalate, resolve,
/// dismiss, duplicate, ticket status) and for notes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangedDetail {
    pub from: CaseStatus,
    pub to: CaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// Detail for `AuditAction::CaseAssigned`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignedDetail {
    #[serde(default)]
    pub previous: Option<String>,
    pub assignee: String,
    pub from: CaseStatus,
    pub to: CaseStatus,
}

/// Build the `details` map for an accepted action.
///
/// # Errors
///
/// Returns `CoreError::Other` if the detail cannot be serialized.
pub fn details_for(action: &Action, before: &Case, after: &Case) -> Result<serde_json::Value, CoreError> {
    let value = match action {
        Action::Assign { assignee } => serde_json::to_value(AssignedDetail {
            previous: before.assigned_to.clone(),
            assignee: assignee.trim().to_string(),
            from: before.status,
            to: after.status,
        }),
        _ => serde_json::to_value(StatusChangedDetail {
            from: before.status,
            to: after.status,
            note: action.note().map(String::from),
            label: match action {
                Action::Resolve { label, .. } => Some(label.trim().to_string()),
                _ => None,
            },
            duplicate_of: match action {
                Action::MarkDuplicate { duplicate_of } => Some(duplicate_of.trim().to_string()),
                _ => None,
            },
            assignee: if before.assigned_to == after.assigned_to {
                None
            } else {
                after.assigned_to.clone()
            },
        }),
    };
    value.map_err(|e| CoreError::Other(e.into()))
}
