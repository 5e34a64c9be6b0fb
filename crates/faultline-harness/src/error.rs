//! Workbench error type.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced by workbench subcommands.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown trigger `{0}`")]
    UnknownTrigger(String),

    #[error("path does not exist: {0}")]
    MissingPath(PathBuf),

    #[error(transparent)]
    StdIo(#[from] std::io::Error),
}

impl HarnessError {
    /// Attach a path to an io error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Attach a path to a serde_json error.
    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}
