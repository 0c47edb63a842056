//! In-memory [`JobServer`] double for reconciler and pruner tests.

use pipesync_core::JobPath;
use pipesync_remote::{JobServer, NodeKind, RemoteError, RemoteTree};

/// One recorded remote operation, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListTree,
    CreateFolder(String),
    Upsert(String),
    Delete(String),
    Validate,
}

/// Records every call and mutates an in-memory namespace tree the way the
/// real server would.
pub(crate) struct MockServer {
    pub tree: RemoteTree,
    pub calls: Vec<Call>,
    /// Fixed messages returned by every validation call.
    pub validation_messages: Vec<String>,
    /// When set, content containing this marker fails validation.
    pub reject_containing: Option<String>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::with_tree(RemoteTree::default())
    }

    pub fn with_tree(tree: RemoteTree) -> Self {
        Self {
            tree,
            calls: Vec::new(),
            validation_messages: Vec::new(),
            reject_containing: None,
        }
    }
}

impl JobServer for MockServer {
    fn list_tree(&mut self) -> Result<RemoteTree, RemoteError> {
        self.calls.push(Call::ListTree);
        Ok(self.tree.clone())
    }

    fn create_folder(&mut self, path: &JobPath) -> Result<(), RemoteError> {
        self.calls.push(Call::CreateFolder(path.to_string()));
        if self.tree.node_at(path).is_some() {
            return Err(RemoteError::AlreadyExists { path: path.clone() });
        }
        self.tree.insert(path, NodeKind::Folder);
        Ok(())
    }

    fn upsert_job(&mut self, path: &JobPath, _config_xml: &str) -> Result<(), RemoteError> {
        self.calls.push(Call::Upsert(path.to_string()));
        self.tree.insert(path, NodeKind::Job);
        Ok(())
    }

    fn delete_job(&mut self, path: &JobPath) -> Result<(), RemoteError> {
        self.calls.push(Call::Delete(path.to_string()));
        match self.tree.remove(path) {
            Some(_) => Ok(()),
            None => Err(RemoteError::NotFound { path: path.clone() }),
        }
    }

    fn validate_syntax(&mut self, content: &str) -> Result<Vec<String>, RemoteError> {
        self.calls.push(Call::Validate);
        let mut messages = self.validation_messages.clone();
        if let Some(marker) = &self.reject_containing {
            if content.contains(marker) {
                messages.push(format!("compilation error near '{marker}'"));
            }
        }
        Ok(messages)
    }
}
