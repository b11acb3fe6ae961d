//! # cbk-config
//!
//! Layered configuration loading for Casebook using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CASEBOOK_*` prefix, `__` as separator)
//! 2. Project-level `.casebook/config.toml`
//! 3. User-level `~/.config/casebook/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `CASEBOOK_WORKFLOW__ALLOW_TICKET_REOPEN` -> `workflow.allow_ticket_reopen`,
//! `CASEBOOK_ACTOR__NAME` -> `actor.name`, and so on.
//!
//! # Usage
//!
//! ```no_run
//! use cbk_config::CasebookConfig;
//!
//! let config = CasebookConfig::load_with_dotenv().expect("config");
//! let policy = config.workflow.policy();
//! ```

mod actor;
mod error;
mod export;
mod general;
mod workflow;

pub use actor::ActorConfig;
pub use error::ConfigError;
pub use export::ExportConfig;
pub use general::GeneralConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project directory holding config and workspace state.
pub const PROJECT_DIR: &str = ".casebook";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CasebookConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub actor: ActorConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl CasebookConfig {
    /// Load configuration from all sources, resolving the project file
    /// relative to the current directory.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for_project(Path::new("."))
    }

    /// Load configuration using `<project_root>/.casebook/config.toml` as the
    /// project layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load_for_project(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment(project_root)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CASEBOOK_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("casebook").join("config.toml"))
    }
}
