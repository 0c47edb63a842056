//! # pipesync-renderer
//!
//! Pure rendering of a pipeline definition's content into the remote
//! server's job descriptor XML. No I/O; one call per changed file per run.

pub mod annotations;
pub mod engine;
pub mod error;

pub use engine::{JobSpec, Renderer};
pub use error::RenderError;
