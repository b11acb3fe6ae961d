//! Identity stamped on audit entries by the CLI.

use cbk_core::entities::Actor;
use cbk_core::enums::Role;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_name() -> String {
    "admin".to_string()
}

const fn default_role() -> Role {
    Role::Admin
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActorConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_role")]
    pub role: Role,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            role: default_role(),
        }
    }
}

impl ActorConfig {
    /// Build the audit actor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the name is blank.
    pub fn actor(&self) -> Result<Actor, ConfigError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "actor.name".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(Actor::new(name, self.role))
    }
}
