//! # pipesync-remote
//!
//! The remote namespace boundary: the [`JobServer`] contract the reconciler
//! drives, the typed [`tree`] view of the remote folder/job hierarchy, and the
//! thin blocking HTTP implementation [`HttpJobServer`].

pub mod error;
pub mod http;
pub mod server;
pub mod tree;

pub use error::RemoteError;
pub use http::{HttpJobServer, ServerInfo, FOLDER_CLASS};
pub use server::{Credentials, JobServer};
pub use tree::{NodeKind, RemoteNode, RemoteTree};
