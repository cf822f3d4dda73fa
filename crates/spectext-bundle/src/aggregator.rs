//! Navigation-ordered aggregation.
//!
//! Resolve and load run in parallel on the rayon pool; `par_iter().collect()`
//! keeps the input order, so sections are always joined in navigation order.

use std::sync::Arc;

use rayon::prelude::*;
use spectext_storage::Storage;

use crate::loader::ContentLoader;
use crate::resolver::PathResolver;
use crate::summary::{BuildSummary, PageIssue, SchemaPart};

/// Separator line placed between sections.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Placeholder substituted with the selected version in the schema directory.
const VERSION_PLACEHOLDER: &str = "{version}";

/// Location of a version's schema artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaLayout {
    /// Directory holding the schema pair (may contain `{version}`).
    pub dir: String,
    /// Type-definition source file name.
    pub source_file: String,
    /// Generated JSON schema file name.
    pub json_file: String,
}

impl Default for SchemaLayout {
    fn default() -> Self {
        Self {
            dir: "schema/{version}".to_owned(),
            source_file: "schema.ts".to_owned(),
            json_file: "schema.json".to_owned(),
        }
    }
}

impl SchemaLayout {
    /// Path of a schema part for a version.
    #[must_use]
    pub fn path_for(&self, part: SchemaPart, version: &str) -> String {
        let dir = self.dir.replace(VERSION_PLACEHOLDER, version);
        let file = match part {
            SchemaPart::Source => &self.source_file,
            SchemaPart::Json => &self.json_file,
        };
        let dir = dir.trim_end_matches('/');
        if dir.is_empty() {
            file.clone()
        } else {
            format!("{dir}/{file}")
        }
    }
}

/// A page that made it into the artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Logical path from the navigation.
    pub logical_path: String,
    /// File the page was read from.
    pub file: String,
    /// Section title.
    pub title: String,
    /// Normalized body.
    pub content: String,
}

impl ResolvedPage {
    /// Titled section for this page.
    #[must_use]
    pub fn section(&self) -> String {
        format!("# {}\n\n{}", self.title, self.content)
    }
}

/// Aggregated text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateArtifact {
    /// Page sections joined in navigation order.
    pub primary: String,
    /// Primary content followed by the schema sections, when requested.
    pub supplementary: Option<String>,
}

/// Result of an aggregation run.
#[derive(Debug)]
pub struct Aggregation {
    /// Pages emitted, in navigation order.
    pub pages: Vec<ResolvedPage>,
    /// Aggregated text.
    pub artifact: AggregateArtifact,
    /// Counts and warnings.
    pub summary: BuildSummary,
}

/// Outcome of resolving and loading a single page.
enum PageOutcome {
    Loaded(ResolvedPage),
    Skipped(PageIssue),
}

/// Section title for a logical path: everything after the version segment.
///
/// `docs/specification/2025-06-18/basic/lifecycle` becomes `basic/lifecycle`.
/// Paths without a version segment are returned unchanged.
#[must_use]
pub fn display_title<'a>(logical_path: &'a str, version: &str) -> &'a str {
    if version.is_empty() {
        return logical_path;
    }

    let mut offset = 0;
    for segment in logical_path.split('/') {
        offset += segment.len() + 1;
        if segment == version {
            return match logical_path.get(offset..) {
                Some(rest) if !rest.is_empty() => rest,
                _ => logical_path,
            };
        }
    }
    logical_path
}

/// Assembles pages into the aggregate artifact.
pub struct Aggregator {
    storage: Arc<dyn Storage>,
    resolver: PathResolver,
    loader: ContentLoader,
    schema: SchemaLayout,
}

impl Aggregator {
    /// Create an aggregator with default extensions and schema layout.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            resolver: PathResolver::new(Arc::clone(&storage)),
            loader: ContentLoader::new(Arc::clone(&storage)),
            storage,
            schema: SchemaLayout::default(),
        }
    }

    /// Use custom document extensions (without leading dots).
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.resolver = PathResolver::with_extensions(Arc::clone(&self.storage), extensions);
        self
    }

    /// Use a custom schema layout.
    #[must_use]
    pub fn with_schema(mut self, schema: SchemaLayout) -> Self {
        self.schema = schema;
        self
    }

    /// Aggregate logical paths, in order, for a version.
    ///
    /// Missing and unreadable pages are skipped and reported in the summary.
    /// With `include_supplementary`, the version's schema source and JSON
    /// schema are appended, when present, to a second copy of the content.
    pub fn aggregate(
        &self,
        logical_paths: &[String],
        version: &str,
        include_supplementary: bool,
    ) -> Aggregation {
        let outcomes: Vec<PageOutcome> = logical_paths
            .par_iter()
            .map(|logical_path| self.load_page(logical_path, version))
            .collect();

        let mut pages = Vec::with_capacity(outcomes.len());
        let mut issues = Vec::new();
        for outcome in outcomes {
            match outcome {
                PageOutcome::Loaded(page) => {
                    tracing::debug!(path = %page.logical_path, file = %page.file, "Resolved page");
                    pages.push(page);
                }
                PageOutcome::Skipped(issue) => {
                    match &issue {
                        PageIssue::Missing { logical_path } => {
                            tracing::warn!(path = %logical_path, "Page not found, skipping");
                        }
                        PageIssue::Unreadable {
                            logical_path,
                            file,
                            error,
                        } => {
                            tracing::error!(path = %logical_path, %file, %error, "Failed to read page, skipping");
                        }
                    }
                    issues.push(issue);
                }
            }
        }

        let mut sections: Vec<String> = pages.iter().map(ResolvedPage::section).collect();
        let primary = sections.join(SECTION_SEPARATOR);

        let mut missing_schema = Vec::new();
        let supplementary = include_supplementary.then(|| {
            for part in [SchemaPart::Source, SchemaPart::Json] {
                match self.schema_section(part, version) {
                    Some(section) => sections.push(section),
                    None => missing_schema.push(part),
                }
            }
            sections.join(SECTION_SEPARATOR)
        });

        let summary = BuildSummary {
            version: version.to_owned(),
            pages_found: logical_paths.len(),
            pages_resolved: pages.len(),
            issues,
            missing_schema,
        };
        tracing::info!(
            version,
            found = summary.pages_found,
            resolved = summary.pages_resolved,
            skipped = summary.issues.len(),
            "Aggregation completed"
        );

        Aggregation {
            pages,
            artifact: AggregateArtifact {
                primary,
                supplementary,
            },
            summary,
        }
    }

    /// Resolve and load one page.
    fn load_page(&self, logical_path: &str, version: &str) -> PageOutcome {
        let Some(file) = self.resolver.resolve(logical_path) else {
            return PageOutcome::Skipped(PageIssue::Missing {
                logical_path: logical_path.to_owned(),
            });
        };

        match self.loader.load(&file) {
            Ok(content) => PageOutcome::Loaded(ResolvedPage {
                title: display_title(logical_path, version).to_owned(),
                logical_path: logical_path.to_owned(),
                file,
                content,
            }),
            // Removed between the existence probe and the read.
            Err(e) if e.is_not_found() => PageOutcome::Skipped(PageIssue::Missing {
                logical_path: logical_path.to_owned(),
            }),
            Err(e) => PageOutcome::Skipped(PageIssue::Unreadable {
                logical_path: logical_path.to_owned(),
                file,
                error: e.to_string(),
            }),
        }
    }

    /// Fenced section embedding a schema part, or `None` if it can't be read.
    fn schema_section(&self, part: SchemaPart, version: &str) -> Option<String> {
        let path = self.schema.path_for(part, version);
        match self.storage.read(&path) {
            Ok(content) => Some(format!(
                "# {}\n\n```{}\n{}\n```",
                part.heading(),
                part.fence_language(),
                content.trim()
            )),
            Err(e) if e.is_not_found() => {
                tracing::warn!(%path, "No {part} for version {version}");
                None
            }
            Err(e) => {
                tracing::error!(%path, error = %e, "Failed to read {part}");
                None
            }
        }
    }
}
