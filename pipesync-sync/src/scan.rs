//! Local tree walk and content fingerprinting.
//!
//! Every file ending in [`PIPELINE_SUFFIX`] is read in full and hashed;
//! nothing else is looked at. The walk is sorted by file name at every level
//! so repeated runs over an unchanged tree log identically. A tracked file
//! that cannot be read is fatal — a file disappearing mid-walk must abort
//! the run, not be silently dropped (it would otherwise be scheduled for
//! remote deletion).

use std::path::Path;

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use pipesync_core::{Snapshot, PIPELINE_SUFFIX};

use crate::error::{io_err, SyncError};

/// Walk `root` and fingerprint every tracked file into a fresh snapshot.
///
/// Keys are relative paths with `/` separators on every platform.
pub fn scan_tree(root: &Path) -> Result<Snapshot, SyncError> {
    let mut snapshot = Snapshot::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            io_err(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry
            .file_name()
            .to_string_lossy()
            .ends_with(PIPELINE_SUFFIX)
        {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        let digest = fingerprint(entry.path())?;
        snapshot.insert(rel, digest);
    }
    Ok(snapshot)
}

/// SHA-256 hex digest of a file's byte content.
pub fn fingerprint(path: &Path) -> Result<String, SyncError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn only_tracked_suffix_is_fingerprinted() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "build.Jenkinsfile", "node { }");
        write(tmp.path(), "README.md", "docs");
        write(tmp.path(), "pipesync.json", "{\"files\":{}}");

        let snapshot = scan_tree(tmp.path()).unwrap();
        assert_eq!(
            snapshot.keys().collect::<Vec<_>>(),
            ["build.Jenkinsfile"]
        );
    }

    #[test]
    fn nested_paths_use_forward_slashes() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "ci/nightly/build.Jenkinsfile", "node { }");

        let snapshot = scan_tree(tmp.path()).unwrap();
        assert!(snapshot.contains_key("ci/nightly/build.Jenkinsfile"));
    }

    #[test]
    fn digest_tracks_content_not_path() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.Jenkinsfile", "same");
        write(tmp.path(), "b/c.Jenkinsfile", "same");
        write(tmp.path(), "d.Jenkinsfile", "different");

        let snapshot = scan_tree(tmp.path()).unwrap();
        assert_eq!(snapshot["a.Jenkinsfile"], snapshot["b/c.Jenkinsfile"]);
        assert_ne!(snapshot["a.Jenkinsfile"], snapshot["d.Jenkinsfile"]);
    }

    #[test]
    fn repeated_scans_are_identical() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "zeta/x.Jenkinsfile", "1");
        write(tmp.path(), "alpha/y.Jenkinsfile", "2");
        write(tmp.path(), "top.Jenkinsfile", "3");

        assert_eq!(scan_tree(tmp.path()).unwrap(), scan_tree(tmp.path()).unwrap());
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("absent");
        let err = scan_tree(&gone).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }), "got {err:?}");
    }
}
