//! Site error types.

use std::path::PathBuf;

/// Error returned while loading or building a site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A source document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An output file or directory could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The RSS writer failed.
    #[error("Feed XML error: {0}")]
    Feed(#[source] std::io::Error),
    /// The pages manifest could not be serialized.
    #[error("Manifest JSON error: {0}")]
    Manifest(#[from] serde_json::Error),
}
