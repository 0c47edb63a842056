//! Typed view of the remote namespace hierarchy.
//!
//! Built once per run from a single listing call and traversed with indexed
//! segment lookups. The [`NodeKind`] tag is assigned by the adapter when it
//! builds the tree; nothing downstream inspects server class names.

use std::collections::BTreeMap;

use pipesync_core::JobPath;

/// What a remote namespace entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A folder owning child entries.
    Folder,
    /// A leaf job.
    Job,
}

/// One entry in the remote namespace, keyed by its local segment in the
/// parent's child map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNode {
    pub kind: NodeKind,
    pub children: BTreeMap<String, RemoteNode>,
}

impl RemoteNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: BTreeMap::new(),
        }
    }

    pub fn folder() -> Self {
        Self::new(NodeKind::Folder)
    }

    pub fn job() -> Self {
        Self::new(NodeKind::Job)
    }

    /// A folder with zero children — the only thing the pruner may delete.
    pub fn is_empty_folder(&self) -> bool {
        self.kind == NodeKind::Folder && self.children.is_empty()
    }
}

/// The full remote hierarchy, rooted at the server's top level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteTree {
    pub roots: BTreeMap<String, RemoteNode>,
}

impl RemoteTree {
    /// Look up the node at `path`, if every segment resolves.
    pub fn node_at(&self, path: &JobPath) -> Option<&RemoteNode> {
        let mut children = &self.roots;
        let mut node = None;
        for seg in path.segments() {
            node = children.get(seg);
            children = &node?.children;
        }
        node
    }

    /// Insert a node at `path`, creating missing intermediate folders.
    pub fn insert(&mut self, path: &JobPath, kind: NodeKind) {
        let Some((last, rest)) = path.segments().split_last() else {
            return;
        };
        let mut children = &mut self.roots;
        for seg in rest {
            children = &mut children
                .entry(seg.clone())
                .or_insert_with(RemoteNode::folder)
                .children;
        }
        children.insert(last.clone(), RemoteNode::new(kind));
    }

    /// Remove and return the node at `path`, if present.
    pub fn remove(&mut self, path: &JobPath) -> Option<RemoteNode> {
        let (last, rest) = path.segments().split_last()?;
        let mut children = &mut self.roots;
        for seg in rest {
            children = &mut children.get_mut(seg)?.children;
        }
        children.remove(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> JobPath {
        JobPath::from_segments(p.split('/'))
    }

    #[test]
    fn insert_creates_intermediate_folders() {
        let mut tree = RemoteTree::default();
        tree.insert(&path("ci/nightly/build"), NodeKind::Job);

        let ci = tree.node_at(&path("ci")).unwrap();
        assert_eq!(ci.kind, NodeKind::Folder);
        let job = tree.node_at(&path("ci/nightly/build")).unwrap();
        assert_eq!(job.kind, NodeKind::Job);
    }

    #[test]
    fn node_at_misses_unknown_segments() {
        let mut tree = RemoteTree::default();
        tree.insert(&path("ci/build"), NodeKind::Job);

        assert!(tree.node_at(&path("ci/missing")).is_none());
        assert!(tree.node_at(&path("other")).is_none());
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut tree = RemoteTree::default();
        tree.insert(&path("ci/build"), NodeKind::Job);

        let removed = tree.remove(&path("ci/build")).unwrap();
        assert_eq!(removed.kind, NodeKind::Job);
        assert!(tree.node_at(&path("ci/build")).is_none());
        assert!(
            tree.node_at(&path("ci")).unwrap().is_empty_folder(),
            "parent folder should now be empty"
        );
    }

    #[test]
    fn empty_folder_check_excludes_jobs() {
        assert!(RemoteNode::folder().is_empty_folder());
        assert!(!RemoteNode::job().is_empty_folder());

        let mut populated = RemoteNode::folder();
        populated
            .children
            .insert("build".to_string(), RemoteNode::job());
        assert!(!populated.is_empty_folder());
    }
}
