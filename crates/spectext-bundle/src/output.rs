//! Artifact writing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregator::AggregateArtifact;
use crate::error::BundleError;

/// Destination files for the aggregated artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    /// Primary artifact.
    pub primary: PathBuf,
    /// Supplementary artifact.
    pub supplementary: PathBuf,
}

/// Write the artifacts, creating parent directories as needed.
///
/// The primary artifact is always written; the supplementary one only when
/// present. Existing files are overwritten.
///
/// # Errors
///
/// Returns [`BundleError`] if a directory can't be created or a file can't be written.
pub fn write_artifacts(
    artifact: &AggregateArtifact,
    paths: &OutputPaths,
) -> Result<Vec<PathBuf>, BundleError> {
    let mut written = Vec::with_capacity(2);

    write_file(&paths.primary, &artifact.primary)?;
    written.push(paths.primary.clone());

    if let Some(supplementary) = &artifact.supplementary {
        write_file(&paths.supplementary, supplementary)?;
        written.push(paths.supplementary.clone());
    }

    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<(), BundleError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| BundleError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| BundleError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote artifact");
    Ok(())
}
