//! Navigation configuration model.
//!
//! Mirrors the `navigation` section of a docs-site navigation file:
//!
//! ```json
//! {
//!   "navigation": {
//!     "tabs": [
//!       {
//!         "tab": "Specification",
//!         "groups": [
//!           {
//!             "group": "2025-06-18 (Latest)",
//!             "pages": [
//!               "specification/2025-06-18/index",
//!               { "group": "Base Protocol", "pages": ["/basic/lifecycle"] }
//!             ]
//!           }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! Keys the aggregator does not use (icons, anchors, theme settings) are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::NavigationError;

/// Root navigation configuration: ordered tabs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NavigationConfig {
    /// Top-level tabs in authoring order.
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

/// Wrapper matching the navigation file's top-level object.
#[derive(Deserialize)]
struct NavigationFile {
    #[serde(default)]
    navigation: NavigationConfig,
}

/// Named top-level section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Tab {
    /// Display label, compared case-insensitively.
    #[serde(rename = "tab")]
    pub label: String,
    /// Groups in authoring order.
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Named collection of pages within a tab.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Group {
    /// Display label; may carry a version date and/or the current marker.
    #[serde(rename = "group")]
    pub label: String,
    /// Page tree in authoring order.
    #[serde(default)]
    pub pages: Vec<PageTreeNode>,
}

/// Node of a group's page tree.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PageTreeNode {
    /// A single document reference.
    Page(String),
    /// Nested group of pages.
    SubGroup {
        /// Display label.
        #[serde(rename = "group")]
        label: String,
        /// Child nodes in authoring order.
        #[serde(default)]
        pages: Vec<PageTreeNode>,
    },
}

impl NavigationConfig {
    /// Parse a navigation file's JSON content.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Parse`] if the content isn't valid JSON or a
    /// page entry is neither a string nor a group object.
    pub fn from_json(content: &str) -> Result<Self, NavigationError> {
        let file: NavigationFile = serde_json::from_str(content)?;
        Ok(file.navigation)
    }

    /// Read and parse a navigation file.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Read`] if the file can't be read, or
    /// [`NavigationError::Parse`] if it can't be parsed.
    pub fn load(path: &Path) -> Result<Self, NavigationError> {
        let content = std::fs::read_to_string(path).map_err(|source| NavigationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}
