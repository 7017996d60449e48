//! Nested key/list splitting - flatten indented lists into one file per list
//!
//! Parsing is single-threaded and streaming: [`Flattener`] turns each closed
//! list into an [`Artifact`](crate::Artifact) as soon as it is known to be
//! complete. [`ArtifactWriter`] writes those artifacts concurrently, creating
//! new files only, and exposes a `wait` barrier for the caller.

pub mod line;
pub mod flattener;
pub mod writer;

pub use line::Line;
pub use flattener::Flattener;
pub use writer::{write_artifact, ArtifactWriter};
