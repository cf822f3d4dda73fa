//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading documents from the local filesystem.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a project directory.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use spectext_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("."));
/// let content = storage.read("docs/docs.json")?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Root directory all paths are resolved against.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Validate that a path doesn't escape the root directory.
    ///
    /// Rejects paths containing parent directory components (`..`) and
    /// absolute paths.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        let escapes = Path::new(path).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if escapes {
            tracing::debug!(path, "Rejected path outside storage root");
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.root.join(path);
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate_path(path).is_ok() && self.root.join(path).is_file()
    }
}
