//! Persisted snapshot state.
//!
//! A single JSON document (`pipesync.json` under the tracked root) records the
//! content digest of every tracked file as of the last fully applied run.
//! Writes use an atomic `.tmp` + rename so a crash never leaves a torn file.
//!
//! The file is read permissively when absent (first run: empty state, every
//! tracked file shows up as changed) but a malformed file is a hard error —
//! see [`StateError::Parse`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, StateError};
use crate::types::Snapshot;

/// Default state file name, resolved under the tracked root.
pub const STATE_FILE_NAME: &str = "pipesync.json";

/// On-disk snapshot payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    pub files: Snapshot,
}

/// Default state file location for a tracked root: `<root>/pipesync.json`.
pub fn state_path_at(root: &Path) -> PathBuf {
    root.join(STATE_FILE_NAME)
}

/// Load the persisted snapshot.
///
/// Returns an empty state if the file does not yet exist.
pub fn load(path: &Path) -> Result<StateFile, StateError> {
    if !path.exists() {
        return Ok(StateFile::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|e| StateError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save the snapshot atomically.
///
/// Writes to `<path>.tmp` then renames to `<path>`. Key order in the output
/// is stable (sorted) for reproducible diffs on inspection.
pub fn save(path: &Path, state: &StateFile) -> Result<(), StateError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
        }
    }

    let json = serde_json::to_string_pretty(state)?;
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}
