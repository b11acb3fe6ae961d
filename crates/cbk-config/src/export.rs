//! Audit export configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Directory exports are written to. Empty means the current directory.
    #[serde(default)]
    pub dir: String,
}

impl ExportConfig {
    #[must_use]
    pub fn dir(&self) -> PathBuf {
        if self.dir.trim().is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.dir)
        }
    }
}
