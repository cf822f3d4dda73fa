//! Page tree flattening.
//!
//! Turns a group's page tree into logical paths in depth-first pre-order, so
//! a sub-group's pages appear contiguously at the sub-group's position.
//!
//! Page references come in two forms:
//!
//! - **absolute** (`/basic/lifecycle`): the root marker is replaced by the
//!   specification directory of the selected version;
//! - **relative** (`specification/2025-06-18/index`): joined onto the docs
//!   directory and the enclosing prefix.

use crate::model::PageTreeNode;

/// Placeholder substituted with the selected version in `spec_dir`.
const VERSION_PLACEHOLDER: &str = "{version}";

/// Directory layout used to turn page references into logical paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathLayout {
    /// Base directory for relative references.
    pub docs_dir: String,
    /// Specification directory for absolute references (may contain `{version}`).
    pub spec_dir: String,
    /// Prefix marking a reference as absolute.
    pub root_marker: String,
}

impl Default for PathLayout {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_owned(),
            spec_dir: "docs/specification/{version}".to_owned(),
            root_marker: "/".to_owned(),
        }
    }
}

impl PathLayout {
    /// Specification directory with the version substituted.
    #[must_use]
    pub fn spec_dir_for(&self, version: &str) -> String {
        self.spec_dir.replace(VERSION_PLACEHOLDER, version)
    }

    /// Logical path of a single page reference.
    #[must_use]
    pub fn logical_path(&self, reference: &str, version: &str, prefix: &str) -> String {
        match reference.strip_prefix(self.root_marker.as_str()) {
            Some(rest) => join_segments(&[&self.spec_dir_for(version), rest]),
            None => join_segments(&[&self.docs_dir, prefix, reference]),
        }
    }
}

/// Join path segments with exactly one `/` between them, skipping empty ones.
///
/// A leading `/` on the first segment is kept.
#[must_use]
pub fn join_segments(segments: &[&str]) -> String {
    let mut joined = String::new();
    for segment in segments {
        let segment = if joined.is_empty() {
            segment.trim_end_matches('/')
        } else {
            segment.trim_matches('/')
        };
        if segment.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(segment);
    }
    joined
}

/// A navigation page reference and the logical path it maps to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatPage {
    /// Reference as written in the navigation file.
    pub reference: String,
    /// Logical path derived from it.
    pub logical_path: String,
}

/// Flatten a page tree into ordered logical paths.
#[must_use]
pub fn flatten(pages: &[PageTreeNode], layout: &PathLayout, version: &str) -> Vec<String> {
    flatten_with_prefix(pages, layout, version, "")
}

/// Flatten a page tree, keeping each reference next to its logical path.
#[must_use]
pub fn flatten_pages(pages: &[PageTreeNode], layout: &PathLayout, version: &str) -> Vec<FlatPage> {
    let mut flat = Vec::new();
    collect(pages, layout, version, "", &mut flat);
    flat
}

/// Flatten a page tree, joining relative references onto `prefix` below the docs directory.
#[must_use]
pub fn flatten_with_prefix(
    pages: &[PageTreeNode],
    layout: &PathLayout,
    version: &str,
    prefix: &str,
) -> Vec<String> {
    let mut flat = Vec::new();
    collect(pages, layout, version, prefix, &mut flat);
    flat.into_iter().map(|page| page.logical_path).collect()
}

/// Recursively collect pages in pre-order.
fn collect(
    pages: &[PageTreeNode],
    layout: &PathLayout,
    version: &str,
    prefix: &str,
    flat: &mut Vec<FlatPage>,
) {
    for node in pages {
        match node {
            PageTreeNode::Page(reference) => flat.push(FlatPage {
                reference: reference.clone(),
                logical_path: layout.logical_path(reference, version, prefix),
            }),
            PageTreeNode::SubGroup { pages, .. } => {
                collect(pages, layout, version, prefix, flat);
            }
        }
    }
}
