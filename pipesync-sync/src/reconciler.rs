//! Sync orchestration — the linear reconciliation run.
//!
//! ## `sync_tree` — 7-step run
//!
//! 1. Scan the local tree into a fresh snapshot.
//! 2. Diff against the persisted snapshot.
//! 3. Empty changeset: stop before any network activity.
//! 4. Connect (the caller supplies the connector, invoked only now).
//! 5. Apply `changed` in sorted order: validate, render, ensure ancestor
//!    folders, upsert.
//! 6. Apply `deleted` in sorted order, then prune emptied folders.
//! 7. Persist the fresh snapshot as the new baseline.
//!
//! The persisted snapshot is written last, and only on full success. A run
//! that dies after step 5 leaves the old snapshot in place, so the next run
//! recomputes the remaining work; re-upserting an already applied item is
//! functionally a no-op and re-deleting an already absent one is tolerated,
//! which is what makes the re-run safe.

use std::path::Path;

use pipesync_core::{state, JobPath, StateFile};
use pipesync_remote::{JobServer, RemoteError};
use pipesync_renderer::Renderer;

use crate::diff::{diff, Changeset};
use crate::error::{io_err, SyncError};
use crate::prune;
use crate::scan;

/// Validation message the server emits for scripted (non-declarative)
/// pipelines even when the syntax is fine. Filtered, never fatal.
const BENIGN_VALIDATION_MARKER: &str = "did not contain the 'pipeline' step";

/// Outcome of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub changeset: Changeset,
    /// Folders removed by the pruning pass, in deletion order.
    pub pruned: Vec<JobPath>,
}

impl SyncReport {
    /// Nothing differed; no remote call was made.
    pub fn is_noop(&self) -> bool {
        self.changeset.is_empty()
    }
}

/// Compute the pending changeset without touching the network or the state
/// file.
pub fn plan(root: &Path, state_path: &Path) -> Result<Changeset, SyncError> {
    let persisted = state::load(state_path)?;
    let current = scan::scan_tree(root)?;
    Ok(diff(&current, &persisted.files))
}

/// Reconcile the local tree at `root` with the remote namespace.
///
/// `connect` is only invoked once the changeset is known to be non-empty,
/// so a no-op run never authenticates.
pub fn sync_tree<S, F>(root: &Path, state_path: &Path, connect: F) -> Result<SyncReport, SyncError>
where
    S: JobServer,
    F: FnOnce() -> Result<S, RemoteError>,
{
    let persisted = state::load(state_path)?;
    let current = scan::scan_tree(root)?;
    let changeset = diff(&current, &persisted.files);

    if changeset.is_empty() {
        tracing::info!("no changes; remote untouched");
        return Ok(SyncReport {
            changeset,
            pruned: Vec::new(),
        });
    }

    let mut server = connect()?;

    apply_changed(root, &mut server, &changeset.changed)?;
    apply_deleted(&mut server, &changeset.deleted)?;

    let deleted_jobs: Vec<JobPath> = changeset
        .deleted
        .iter()
        .map(|rel| JobPath::from_tracked_file(rel))
        .collect();
    let pruned = prune::prune_emptied_folders(&mut server, &deleted_jobs)?;

    state::save(state_path, &StateFile { files: current })?;

    Ok(SyncReport { changeset, pruned })
}

fn apply_changed<S: JobServer>(
    root: &Path,
    server: &mut S,
    changed: &[String],
) -> Result<(), SyncError> {
    if changed.is_empty() {
        return Ok(());
    }
    let renderer = Renderer::new()?;
    for rel in changed {
        let path = root.join(rel);
        let content = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;

        check_syntax(server, rel, &content)?;
        let descriptor = renderer.render(&content)?;

        let job = JobPath::from_tracked_file(rel);
        ensure_ancestors(server, &job)?;
        tracing::info!("upserting job {job}");
        server.upsert_job(&job, &descriptor)?;
    }
    Ok(())
}

fn check_syntax<S: JobServer>(
    server: &mut S,
    rel: &str,
    content: &str,
) -> Result<(), SyncError> {
    let messages: Vec<String> = server
        .validate_syntax(content)?
        .into_iter()
        .filter(|m| !m.contains(BENIGN_VALIDATION_MARKER))
        .collect();
    if messages.is_empty() {
        Ok(())
    } else {
        Err(SyncError::Validation {
            path: rel.into(),
            messages,
        })
    }
}

fn ensure_ancestors<S: JobServer>(server: &mut S, job: &JobPath) -> Result<(), SyncError> {
    for folder in job.ancestors() {
        match server.create_folder(&folder) {
            Ok(()) => tracing::debug!("created folder {folder}"),
            Err(RemoteError::AlreadyExists { .. }) => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn apply_deleted<S: JobServer>(server: &mut S, deleted: &[String]) -> Result<(), SyncError> {
    for rel in deleted {
        let job = JobPath::from_tracked_file(rel);
        match server.delete_job(&job) {
            Ok(()) => tracing::info!("deleted job {job}"),
            // Somebody already deleted the job; the end state is what we
            // wanted either way.
            Err(RemoteError::NotFound { .. }) => {
                tracing::debug!("job {job} already absent remotely");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
