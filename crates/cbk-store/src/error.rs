//! Error types for cbk-store.

use std::path::PathBuf;

use cbk_core::errors::CoreError;
use thiserror::Error;

/// Errors from workspace persistence. Rejected actions stay `CoreError`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record failed an invariant or lookup.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing a workspace file failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A workspace file is not valid JSON for its record type.
    #[error("Malformed workspace file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No workspace has been initialized at this path.
    #[error("No casebook workspace at {}", .0.display())]
    NotInitialized(PathBuf),

    /// `init` was called on an existing workspace without `force`.
    #[error("Casebook workspace already exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
