//! Error types for pipesync-sync.

use std::path::PathBuf;

use thiserror::Error;

use pipesync_core::StateError;
use pipesync_remote::RemoteError;
use pipesync_renderer::RenderError;

/// All errors that can arise from reconciliation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the snapshot state store.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// An error from the remote namespace.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// An error from descriptor rendering.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server rejected a pipeline definition's syntax.
    #[error("syntax validation failed for {}: {}", path.display(), messages.join("; "))]
    Validation {
        path: PathBuf,
        messages: Vec<String>,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
