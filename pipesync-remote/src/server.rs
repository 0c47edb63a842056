//! The [`JobServer`] contract driven by the reconciler.

use pipesync_core::JobPath;

use crate::error::RemoteError;
use crate::tree::RemoteTree;

/// Username and API token pair for the remote server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

/// Operations the reconciler needs from the remote namespace.
///
/// Implementations map their own failure modes onto [`RemoteError`]:
/// folder creation reports an existing entry as
/// [`RemoteError::AlreadyExists`], deletion reports a missing entry as
/// [`RemoteError::NotFound`] — callers treat both as success.
pub trait JobServer {
    /// Fetch the full namespace hierarchy in a single listing call.
    fn list_tree(&mut self) -> Result<RemoteTree, RemoteError>;

    /// Create the folder at `path`; its parent must already exist.
    fn create_folder(&mut self, path: &JobPath) -> Result<(), RemoteError>;

    /// Create or reconfigure the job at `path` with the given descriptor.
    fn upsert_job(&mut self, path: &JobPath, config_xml: &str) -> Result<(), RemoteError>;

    /// Delete the entry (job or folder) at `path`.
    fn delete_job(&mut self, path: &JobPath) -> Result<(), RemoteError>;

    /// Ask the server to check pipeline syntax; returns raw messages, which
    /// the caller filters for known-benign ones.
    fn validate_syntax(&mut self, content: &str) -> Result<Vec<String>, RemoteError>;
}

impl<S: JobServer + ?Sized> JobServer for &mut S {
    fn list_tree(&mut self) -> Result<RemoteTree, RemoteError> {
        (**self).list_tree()
    }

    fn create_folder(&mut self, path: &JobPath) -> Result<(), RemoteError> {
        (**self).create_folder(path)
    }

    fn upsert_job(&mut self, path: &JobPath, config_xml: &str) -> Result<(), RemoteError> {
        (**self).upsert_job(path, config_xml)
    }

    fn delete_job(&mut self, path: &JobPath) -> Result<(), RemoteError> {
        (**self).delete_job(path)
    }

    fn validate_syntax(&mut self, content: &str) -> Result<Vec<String>, RemoteError> {
        (**self).validate_syntax(content)
    }
}
