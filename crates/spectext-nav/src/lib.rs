//! Navigation model, version selection and page tree flattening.
//!
//! The navigation file is the sole authority on which documents belong to a
//! specification version and in what order. This crate turns it into an
//! ordered list of logical page paths:
//!
//! ```text
//! docs.json -> NavigationConfig -> select_version -> SelectedVersion
//!           -> flatten -> ["docs/specification/2025-06-18/index", ...]
//! ```
//!
//! # Example
//!
//! ```
//! use spectext_nav::{NavigationConfig, PathLayout, VersionRules, flatten, select_version};
//!
//! let nav = NavigationConfig::from_json(r#"{
//!     "navigation": {"tabs": [{
//!         "tab": "Specification",
//!         "groups": [{"group": "2025-06-18 (Latest)", "pages": ["/basic/lifecycle"]}]
//!     }]}
//! }"#).unwrap();
//!
//! let selected = select_version(&nav.tabs, &VersionRules::default()).unwrap();
//! let paths = flatten(selected.pages, &PathLayout::default(), &selected.version);
//!
//! assert_eq!(selected.version, "2025-06-18");
//! assert_eq!(paths, vec!["docs/specification/2025-06-18/basic/lifecycle"]);
//! ```

mod error;
mod flatten;
mod model;
mod version;

pub use error::NavigationError;
pub use flatten::{FlatPage, PathLayout, flatten, flatten_pages, flatten_with_prefix, join_segments};
pub use model::{Group, NavigationConfig, PageTreeNode, Tab};
pub use version::{SelectedVersion, Selection, VersionRules, extract_version, select_version};
