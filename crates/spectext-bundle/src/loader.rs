//! Document loading and frontmatter removal.
//!
//! Documents may start with a presentation metadata block:
//!
//! ```text
//! ---
//! title: Lifecycle
//! ---
//!
//! Body text.
//! ```
//!
//! The block is removed only when its opening `---` line is the very first
//! line of the file. A `---` pair further down is document content.

use std::sync::Arc;

use spectext_storage::{Storage, StorageError};

/// Frontmatter delimiter line.
const MARKER: &str = "---";

/// Reads documents and returns their normalized body.
pub struct ContentLoader {
    storage: Arc<dyn Storage>,
}

impl ContentLoader {
    /// Create a loader over the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read a resolved file and return its normalized body.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file can't be read.
    pub fn load(&self, file: &str) -> Result<String, StorageError> {
        let raw = self.storage.read(file)?;
        Ok(normalize(&raw).to_owned())
    }
}

/// Strip the leading frontmatter block and surrounding whitespace.
#[must_use]
pub fn normalize(content: &str) -> &str {
    strip_frontmatter(content).trim()
}

/// Remove a frontmatter block starting at offset zero.
///
/// Removes the opening marker line, everything up to the closing marker line,
/// the closing marker line and the line break after it. Content without a
/// leading block, or with an unterminated one, is returned unchanged.
#[must_use]
pub fn strip_frontmatter(content: &str) -> &str {
    let Some(mut rest) = strip_marker_line(content) else {
        return content;
    };

    loop {
        if let Some(body) = strip_marker_line(rest) {
            return body;
        }
        match rest.find('\n') {
            Some(end) => rest = &rest[end + 1..],
            None => return content,
        }
    }
}

/// If `text` starts with a marker line, return what follows its line break.
fn strip_marker_line(text: &str) -> Option<&str> {
    let after = text.strip_prefix(MARKER)?;
    if after.is_empty() {
        return Some(after);
    }
    after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
}
