//! # pipesync-core
//!
//! Domain types and persisted snapshot state shared by the pipesync crates.
//!
//! [`JobPath`] is the hierarchical identity of a job on the remote server;
//! [`state`] owns the on-disk snapshot (`pipesync.json`) the reconciler diffs
//! against.

pub mod error;
pub mod state;
pub mod types;

pub use error::StateError;
pub use state::{state_path_at, StateFile, STATE_FILE_NAME};
pub use types::{JobPath, Snapshot, PIPELINE_SUFFIX};
