//! Domain types for pipesync.
//!
//! Tracked files are keyed by normalized relative path strings (`/` separator
//! on every platform); jobs on the remote server are addressed by [`JobPath`],
//! the suffix-stripped segment list derived from a tracked file path.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// File name suffix marking a file as a tracked pipeline definition.
pub const PIPELINE_SUFFIX: &str = ".Jenkinsfile";

/// Mapping from tracked relative file path to its content digest.
///
/// `BTreeMap` keeps key order stable so the persisted form diffs cleanly
/// under inspection.
pub type Snapshot = BTreeMap<String, String>;

/// Hierarchical identity of a job or folder on the remote server.
///
/// Built from a tracked file path by stripping [`PIPELINE_SUFFIX`] and
/// splitting on `/`: `ci/deploy.Jenkinsfile` addresses the job `deploy`
/// inside the folder `ci`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobPath(Vec<String>);

impl JobPath {
    /// Derive the remote job path for a tracked relative file path.
    ///
    /// Strips the pipeline suffix when present and discards empty and `.`
    /// segments, so `./top.Jenkinsfile` and `top.Jenkinsfile` are the same
    /// job.
    pub fn from_tracked_file(rel: &str) -> Self {
        let stem = rel.strip_suffix(PIPELINE_SUFFIX).unwrap_or(rel);
        Self(
            stem.split('/')
                .filter(|seg| !seg.is_empty() && *seg != ".")
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Build a path directly from segments (remote-side entries such as
    /// folders have no backing file).
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Final path segment, if any.
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Enclosing folder path; `None` for root-level entries.
    pub fn parent(&self) -> Option<JobPath> {
        if self.0.len() < 2 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Proper ancestor folders, outermost first: `a/b/c` yields `a`, `a/b`.
    pub fn ancestors(&self) -> Vec<JobPath> {
        (1..self.0.len())
            .map(|len| Self(self.0[..len].to_vec()))
            .collect()
    }

    /// Split into the final segment and the enclosing folder path.
    pub fn split_last(&self) -> Option<(&str, Option<JobPath>)> {
        self.name().map(|name| (name, self.parent()))
    }
}

impl fmt::Display for JobPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_file_strips_suffix_and_dot_prefix() {
        let path = JobPath::from_tracked_file("./ci/deploy.Jenkinsfile");
        assert_eq!(path.segments(), ["ci", "deploy"]);
        assert_eq!(path.to_string(), "ci/deploy");
    }

    #[test]
    fn root_level_job_has_no_parent_or_ancestors() {
        let path = JobPath::from_tracked_file("top.Jenkinsfile");
        assert_eq!(path.segments(), ["top"]);
        assert_eq!(path.parent(), None);
        assert!(path.ancestors().is_empty());
    }

    #[test]
    fn nested_job_yields_ancestors_outermost_first() {
        let path = JobPath::from_tracked_file("a/b/c.Jenkinsfile");
        assert_eq!(
            path.ancestors(),
            vec![
                JobPath::from_segments(["a"]),
                JobPath::from_segments(["a", "b"]),
            ]
        );
        assert_eq!(path.parent(), Some(JobPath::from_segments(["a", "b"])));
    }

    #[test]
    fn non_tracked_name_is_kept_verbatim() {
        let path = JobPath::from_tracked_file("ci/tools");
        assert_eq!(path.segments(), ["ci", "tools"]);
    }

    #[test]
    fn split_last_separates_name_and_folder() {
        let path = JobPath::from_segments(["ci", "deploy"]);
        let (name, parent) = path.split_last().unwrap();
        assert_eq!(name, "deploy");
        assert_eq!(parent, Some(JobPath::from_segments(["ci"])));

        let top = JobPath::from_segments(["top"]);
        let (name, parent) = top.split_last().unwrap();
        assert_eq!(name, "top");
        assert_eq!(parent, None);
    }
}
