//! Error types for pipesync-remote.

use thiserror::Error;

use pipesync_core::JobPath;

/// All errors that can arise from remote namespace operations.
///
/// [`RemoteError::AlreadyExists`] and [`RemoteError::NotFound`] are part of
/// the contract rather than failures: callers creating folders or deleting
/// entries are expected to match and tolerate them.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// No endpoint URL was supplied for the connection.
    #[error("remote endpoint not configured: {0}")]
    Endpoint(String),

    /// Credential check failed when establishing the session.
    #[error("authentication failed against {url} (HTTP {status})")]
    Auth { url: String, status: u16 },

    /// The addressed entry does not exist on the server.
    #[error("remote entry not found: {path}")]
    NotFound { path: JobPath },

    /// The entry already exists (folder creation).
    #[error("remote entry already exists: {path}")]
    AlreadyExists { path: JobPath },

    /// Network-level failure before an HTTP status was available.
    #[error("transport error during {op}: {source}")]
    Transport {
        op: &'static str,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The server rejected the operation with an unexpected status.
    #[error("{op} failed for {path} (HTTP {status})")]
    Api {
        op: &'static str,
        path: String,
        status: u16,
    },

    /// A response body could not be decoded.
    #[error("failed to decode {op} response: {source}")]
    Decode {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },
}
