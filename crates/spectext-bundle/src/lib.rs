//! Page resolution, content normalization and aggregation.
//!
//! Takes the ordered logical paths produced by navigation flattening and
//! assembles them into a single text artifact:
//!
//! 1. [`PathResolver`] maps each logical path to the first existing file among
//!    `<path>.mdx`, `<path>.md` and `<path>`.
//! 2. [`ContentLoader`] reads the file and strips its leading frontmatter block.
//! 3. [`Aggregator`] emits one `# <title>` section per resolved page, in
//!    navigation order, joined by a `---` separator, and optionally appends the
//!    version's schema sources.
//! 4. [`write_artifacts`] writes the result to disk.
//!
//! Pages that cannot be resolved or read are skipped and reported in the
//! [`BuildSummary`]; they never abort the build.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spectext_bundle::Aggregator;
//! use spectext_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(".".into()));
//! let aggregation = Aggregator::new(storage).aggregate(&paths, "2025-06-18", true);
//! println!("{} of {} pages", aggregation.summary.pages_resolved, aggregation.summary.pages_found);
//! ```

mod aggregator;
mod error;
mod loader;
mod output;
mod resolver;
mod summary;

pub use aggregator::{
    AggregateArtifact, Aggregation, Aggregator, ResolvedPage, SECTION_SEPARATOR, SchemaLayout,
    display_title,
};
pub use error::BundleError;
pub use loader::{ContentLoader, normalize, strip_frontmatter};
pub use output::{OutputPaths, write_artifacts};
pub use resolver::{DEFAULT_EXTENSIONS, PathResolver};
pub use summary::{BuildSummary, PageIssue, SchemaPart};
