//! Cross-cutting error types for Casebook.
//!
//! Every rejected action surfaces as one of the three recoverable variants
//! below. Persistence errors live in `cbk-store`; the CLI converges
//! everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Casebook crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// The action has no edge from the case's current status.
    #[error("Illegal transition: {kind} {id} cannot {action} from {status}")]
    IllegalTransition {
        kind: String,
        id: String,
        status: String,
        action: String,
    },

    /// A required field (note, label, assignee) is missing or empty.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a missing case.
    #[must_use]
    pub fn case_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "case".to_string(),
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn is_illegal_transition(&self) -> bool {
        matches!(self, Self::IllegalTransition { .. })
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
