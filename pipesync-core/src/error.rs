//! Error types for pipesync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from snapshot state operations.
#[derive(Debug, Error)]
pub enum StateError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (save path).
    #[error("state JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The state file exists but could not be parsed. Surfaced rather than
    /// auto-reset: silently wiping state would re-create or delete every
    /// tracked job on the next run.
    #[error("failed to parse state file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience constructor for [`StateError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StateError {
    StateError::Io {
        path: path.into(),
        source,
    }
}
