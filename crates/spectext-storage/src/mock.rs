//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores file contents in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use spectext_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("docs/guide.mdx", "---\ntitle: Guide\n---\nContent.");
///
/// let content = storage.read("docs/guide.mdx").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    contents: RwLock<HashMap<String, String>>,
    failures: RwLock<HashMap<String, StorageErrorKind>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Add a file that exists but fails to read with the given error kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, path: impl Into<String>, kind: StorageErrorKind) -> Self {
        self.failures.write().unwrap().insert(path.into(), kind);
        self
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        if let Some(kind) = self.failures.read().unwrap().get(path) {
            return Err(StorageError::new(*kind)
                .with_path(path)
                .with_backend("Mock"));
        }

        self.contents
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound)
                    .with_path(path)
                    .with_backend("Mock")
            })
    }

    fn exists(&self, path: &str) -> bool {
        self.contents.read().unwrap().contains_key(path)
            || self.failures.read().unwrap().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_storage_is_send_sync() {
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_with_file() {
        let storage = MockStorage::new().with_file("guide.md", "# Guide\n\nContent.");

        let content = storage.read("guide.md").unwrap();

        assert_eq!(content, "# Guide\n\nContent.");
    }

    #[test]
    fn test_read_missing() {
        let storage = MockStorage::new();

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
        assert_eq!(err.path.as_deref(), Some(Path::new("missing.md")));
    }

    #[test]
    fn test_unreadable_exists_but_fails() {
        let storage =
            MockStorage::new().with_unreadable("locked.md", StorageErrorKind::PermissionDenied);

        assert!(storage.exists("locked.md"));
        let err = storage.read("locked.md").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_exists() {
        let storage = MockStorage::new().with_file("guide.md", "content");

        assert!(storage.exists("guide.md"));
        assert!(!storage.exists("missing.md"));
    }
}
