//! Snapshot comparison.

use serde::Serialize;

use pipesync_core::Snapshot;

/// The minimal set of remote operations implied by two snapshots.
///
/// `changed` holds paths whose digest differs from the persisted one
/// (including paths the persisted snapshot has never seen); `deleted` holds
/// paths the persisted snapshot knows but the current one does not. The sets
/// are disjoint by construction and both sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Changeset {
    pub changed: Vec<String>,
    pub deleted: Vec<String>,
}

impl Changeset {
    /// Nothing to apply: the run can terminate without any remote call.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.deleted.is_empty()
    }
}

/// Compare a freshly computed snapshot against the persisted one.
///
/// Pure; runs in O(|current| + |persisted|). Paths present in both with an
/// equal digest appear in neither set.
pub fn diff(current: &Snapshot, persisted: &Snapshot) -> Changeset {
    let changed = current
        .iter()
        .filter(|(path, digest)| persisted.get(*path) != Some(*digest))
        .map(|(path, _)| path.clone())
        .collect();
    let deleted = persisted
        .keys()
        .filter(|path| !current.contains_key(*path))
        .cloned()
        .collect();
    Changeset { changed, deleted }
}
