use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a whole conversion
///
/// Per-artifact problems (collisions, failed writes) are not errors; they are
/// reported through [`crate::SplitReport`].
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Can't open file: {}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read source: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to start write pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
