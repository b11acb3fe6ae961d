//! Workflow policy configuration.

use cbk_core::transition::TransitionPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Allow closed support tickets to be moved back to open, pending, or resolved.
    #[serde(default)]
    pub allow_ticket_reopen: bool,
}

impl WorkflowConfig {
    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        TransitionPolicy {
            allow_ticket_reopen: self.allow_ticket_reopen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopen_is_off_by_default() {
        assert!(!WorkflowConfig::default().policy().allow_ticket_reopen);
    }
}
