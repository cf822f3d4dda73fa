//! Navigation error types.

use std::path::PathBuf;

/// Fatal navigation problem: nothing can be aggregated without a version.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Navigation file could not be read.
    #[error("Failed to read navigation file {}: {source}", path.display())]
    Read {
        /// Navigation file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Navigation file is not valid JSON of the expected shape.
    #[error("Invalid navigation file: {0}")]
    Parse(#[from] serde_json::Error),
    /// No tab carries the specification label.
    #[error("Navigation has no \"{0}\" tab")]
    TabNotFound(String),
    /// The specification tab has no group that qualifies as the current version.
    #[error("No current version group in the \"{0}\" tab: no group is marked current and none carries a version date")]
    NoCurrentVersion(String),
    /// The group marked current does not carry a version token.
    #[error("Group \"{0}\" is marked current but has no YYYY-MM-DD version in its label")]
    MissingVersionToken(String),
}
