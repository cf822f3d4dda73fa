//! Logical path to file resolution.

use std::sync::Arc;

use spectext_storage::Storage;

/// Document extensions tried in order: rich documents first, then plain markdown.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mdx", "md"];

/// Resolves logical page paths to existing files.
///
/// Candidates are `<path>.<ext>` for each configured extension, in order,
/// followed by `<path>` itself for references that already carry an extension.
/// The first candidate that exists wins; no content is read.
pub struct PathResolver {
    storage: Arc<dyn Storage>,
    extensions: Vec<String>,
}

impl PathResolver {
    /// Create a resolver with the default extensions.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_extensions(
            storage,
            DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_owned()).collect(),
        )
    }

    /// Create a resolver with custom extensions (without leading dots).
    #[must_use]
    pub fn with_extensions(storage: Arc<dyn Storage>, extensions: Vec<String>) -> Self {
        Self {
            storage,
            extensions,
        }
    }

    /// Candidate file paths for a logical path, in priority order.
    pub fn candidates<'a>(&'a self, logical_path: &'a str) -> impl Iterator<Item = String> + 'a {
        self.extensions
            .iter()
            .map(move |ext| format!("{logical_path}.{ext}"))
            .chain(std::iter::once(logical_path.to_owned()))
    }

    /// First existing candidate for a logical path, or `None` if none exists.
    #[must_use]
    pub fn resolve(&self, logical_path: &str) -> Option<String> {
        self.candidates(logical_path)
            .find(|candidate| self.storage.exists(candidate))
    }
}
