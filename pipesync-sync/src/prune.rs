//! Bottom-up removal of folders emptied by job deletions.
//!
//! Candidates are the parent folders of the deleted paths. The remote tree
//! is fetched once, after all deletions, and every delete is mirrored into
//! that in-memory view so a cascade can see folders emptied earlier in the
//! same pass. Deleting a leaf job can empty a whole chain of ancestors, so
//! each removal re-checks its own parent until a non-empty folder or the
//! root is reached.
//!
//! The only safety guard is the emptiness + folder-kind check: an entry is
//! never deleted while it has children, and job entries are never deleted
//! here at all. A candidate whose path no longer resolves was removed by a
//! prior partial run and is skipped without error.

use std::collections::BTreeSet;

use pipesync_core::JobPath;
use pipesync_remote::{JobServer, RemoteError};

use crate::error::SyncError;

/// Delete folders left empty by the given deletions, cascading upward.
///
/// Returns the pruned folder paths in deletion order.
pub fn prune_emptied_folders<S: JobServer>(
    server: &mut S,
    deleted: &[JobPath],
) -> Result<Vec<JobPath>, SyncError> {
    let candidates: BTreeSet<JobPath> = deleted.iter().filter_map(JobPath::parent).collect();
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let mut tree = server.list_tree()?;
    let mut pruned = Vec::new();

    for candidate in candidates {
        let mut cursor = Some(candidate);
        while let Some(folder) = cursor {
            match tree.node_at(&folder) {
                // Already gone: removed earlier in this pass or by a prior
                // partial run.
                None => break,
                Some(node) if node.is_empty_folder() => {
                    match server.delete_job(&folder) {
                        Ok(()) => tracing::info!("pruned empty folder {folder}"),
                        Err(RemoteError::NotFound { .. }) => {
                            tracing::debug!("folder {folder} already removed remotely");
                        }
                        Err(err) => return Err(err.into()),
                    }
                    tree.remove(&folder);
                    cursor = folder.parent();
                    pruned.push(folder);
                }
                Some(_) => {
                    tracing::debug!("{folder} is not an empty folder; kept");
                    break;
                }
            }
        }
    }

    Ok(pruned)
}
