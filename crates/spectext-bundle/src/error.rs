//! Bundle error types.

use std::path::PathBuf;

/// Error writing aggregated artifacts.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// Output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Artifact could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
