//! Per-run build report.

use std::fmt;

/// A page that was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageIssue {
    /// No candidate file exists for the logical path.
    Missing {
        /// Logical path from the navigation.
        logical_path: String,
    },
    /// A file was resolved but could not be read.
    Unreadable {
        /// Logical path from the navigation.
        logical_path: String,
        /// Resolved file.
        file: String,
        /// Read error message.
        error: String,
    },
}

impl PageIssue {
    /// Logical path of the skipped page.
    #[must_use]
    pub fn logical_path(&self) -> &str {
        match self {
            Self::Missing { logical_path } | Self::Unreadable { logical_path, .. } => logical_path,
        }
    }
}

impl fmt::Display for PageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { logical_path } => write!(f, "{logical_path}: no matching file"),
            Self::Unreadable {
                logical_path,
                file,
                error,
            } => write!(f, "{logical_path}: failed to read {file}: {error}"),
        }
    }
}

/// Optional schema artifact of a version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaPart {
    /// Type-definition source.
    Source,
    /// Generated JSON schema.
    Json,
}

impl SchemaPart {
    /// Heading of the section embedding this part.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Source => "Schema (TypeScript)",
            Self::Json => "Schema (JSON)",
        }
    }

    /// Info string of the fenced code block.
    #[must_use]
    pub fn fence_language(self) -> &'static str {
        match self {
            Self::Source => "typescript",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for SchemaPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("schema source"),
            Self::Json => f.write_str("JSON schema"),
        }
    }
}

/// Counts and warnings of one aggregation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Version the pages were aggregated for.
    pub version: String,
    /// Logical pages in the navigation.
    pub pages_found: usize,
    /// Pages emitted into the artifact.
    pub pages_resolved: usize,
    /// Skipped pages, in navigation order.
    pub issues: Vec<PageIssue>,
    /// Schema parts that were requested but absent.
    pub missing_schema: Vec<SchemaPart>,
}

impl BuildSummary {
    /// Logical paths with no matching file.
    pub fn missing_pages(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().filter_map(|issue| match issue {
            PageIssue::Missing { logical_path } => Some(logical_path.as_str()),
            PageIssue::Unreadable { .. } => None,
        })
    }

    /// Whether every page and requested schema part made it into the output.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.issues.is_empty() && self.missing_schema.is_empty()
    }
}
