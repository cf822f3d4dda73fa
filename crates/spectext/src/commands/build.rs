//! `spectext build` command implementation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use spectext_bundle::{
    Aggregator, BuildSummary, OutputPaths, PageIssue, SchemaLayout, write_artifacts,
};
use spectext_config::{CliSettings, Config};
use spectext_nav::{
    NavigationConfig, PathLayout, Selection, VersionRules, flatten_pages, select_version,
};
use spectext_storage::{FsStorage, Storage};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Also write the supplementary artifact with the schema sources appended.
    #[arg(long)]
    full: bool,

    /// Path to configuration file (default: auto-discover spectext.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Specification tab label (overrides config).
    #[arg(long)]
    tab: Option<String>,

    /// Version that identifies the current group on its own (overrides config).
    #[arg(long, env = "SPECTEXT_ANCHOR_VERSION")]
    anchor_version: Option<String>,

    /// Primary artifact path (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Supplementary artifact path (overrides config).
    #[arg(long)]
    full_output: Option<PathBuf>,

    /// Enable verbose output (per-page resolution logs).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of a build, for reporting.
#[derive(Debug)]
struct BuildReport {
    version: String,
    group: String,
    selection: Selection,
    considered: Vec<String>,
    summary: BuildSummary,
    /// Navigation reference per logical path.
    references: HashMap<String, String>,
    written: Vec<PathBuf>,
}

impl BuildReport {
    /// Issue line naming the navigation reference when it differs from the logical path.
    fn describe_issue(&self, issue: &PageIssue) -> String {
        match self.references.get(issue.logical_path()) {
            Some(reference) if reference != issue.logical_path() => {
                format!("{reference} -> {issue}")
            }
            _ => issue.to_string(),
        }
    }
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or navigation is invalid, or an
    /// artifact can't be written. Missing pages are reported, not errors.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            tab: self.tab,
            anchor_version: self.anchor_version,
            primary_output: self.output,
            full_output: self.full_output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: defaults (no spectext.toml found)"),
        }
        output.info(&format!(
            "Navigation: {}",
            config.navigation_file.display()
        ));

        let report = build(&config, self.full)?;
        print_report(&output, &report);
        Ok(())
    }
}

/// Select the current version, aggregate its pages and write the artifacts.
fn build(config: &Config, full: bool) -> Result<BuildReport, CliError> {
    let navigation = NavigationConfig::load(&config.navigation_file)?;

    let rules = VersionRules {
        tab: config.navigation.tab.clone(),
        current_marker: config.navigation.current_marker.clone(),
        anchor_version: config.navigation.anchor_version.clone(),
    };
    let selected = select_version(&navigation.tabs, &rules)?;
    tracing::info!(version = %selected.version, group = selected.label, "Selected version");

    let layout = PathLayout {
        docs_dir: config.docs.docs_dir.clone(),
        spec_dir: config.docs.spec_dir.clone(),
        root_marker: config.docs.root_marker.clone(),
    };
    let pages = flatten_pages(selected.pages, &layout, &selected.version);
    let logical_paths: Vec<String> = pages.iter().map(|p| p.logical_path.clone()).collect();
    let mut references = HashMap::with_capacity(pages.len());
    for page in pages {
        references.entry(page.logical_path).or_insert(page.reference);
    }

    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.project_dir.clone()));
    let aggregator = Aggregator::new(storage)
        .with_extensions(config.docs.extensions.clone())
        .with_schema(SchemaLayout {
            dir: config.schema.dir.clone(),
            source_file: config.schema.source_file.clone(),
            json_file: config.schema.json_file.clone(),
        });
    let aggregation = aggregator.aggregate(&logical_paths, &selected.version, full);

    let paths = OutputPaths {
        primary: config.output_resolved.primary.clone(),
        supplementary: config.output_resolved.full.clone(),
    };
    let written = write_artifacts(&aggregation.artifact, &paths)?;

    Ok(BuildReport {
        version: selected.version,
        group: selected.label.to_owned(),
        selection: selected.selection,
        considered: selected.considered,
        summary: aggregation.summary,
        references,
        written,
    })
}

fn print_report(output: &Output, report: &BuildReport) {
    output.info(&format!("Versions found: {}", report.considered.join(", ")));
    output.highlight(&format!(
        "Version: {} (group \"{}\", by {})",
        report.version, report.group, report.selection
    ));
    output.info(&format!(
        "Pages: {} in navigation, {} resolved",
        report.summary.pages_found, report.summary.pages_resolved
    ));

    if !report.summary.issues.is_empty() {
        output.separator();
        output.warning(&format!("{} page(s) skipped:", report.summary.issues.len()));
        for issue in &report.summary.issues {
            output.page_issue(issue, &report.describe_issue(issue));
        }
    }
    for part in &report.summary.missing_schema {
        output.warning(&format!("No {part} for version {}", report.version));
    }

    output.separator();
    for path in &report.written {
        output.success(&format!("Wrote {}", path.display()));
    }
    if report.summary.is_complete() {
        output.success(&format!(
            "Aggregated all {} pages of {}",
            report.summary.pages_resolved, report.version
        ));
    } else {
        output.warning(&format!(
            "Aggregated {} of {} pages of {} with warnings",
            report.summary.pages_resolved, report.summary.pages_found, report.version
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    const NAV: &str = r#"{
        "navigation": {
            "tabs": [
                {"tab": "Guides", "groups": []},
                {
                    "tab": "Specification",
                    "groups": [
                        {"group": "2025-06-18 (Latest)", "pages": [
                            "/basic/lifecycle",
                            {"group": "Server", "pages": ["/server/tools", "/server/prompts"]}
                        ]},
                        {"group": "2025-03-26", "pages": ["/basic/lifecycle"]}
                    ]
                }
            ]
        }
    }"#;

    fn write(root: &Path, path: &str, content: &str) {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Project with default layout and an empty config file.
    fn project(config: &str) -> (tempfile::TempDir, Config) {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        write(root, "spectext.toml", config);
        write(root, "docs/docs.json", NAV);
        write(
            root,
            "docs/specification/2025-06-18/basic/lifecycle.mdx",
            "---\ntitle: Lifecycle\n---\n\nLifecycle body.\n",
        );
        write(
            root,
            "docs/specification/2025-06-18/server/tools.md",
            "Tools body.\n",
        );
        write(root, "schema/2025-06-18/schema.ts", "export type Id = string;\n");

        let config = Config::load(Some(&root.join("spectext.toml")), None).unwrap();
        (temp, config)
    }

    #[test]
    fn test_build_writes_primary_artifact() {
        let (temp, config) = project("");

        let report = build(&config, false).unwrap();

        assert_eq!(report.version, "2025-06-18");
        assert_eq!(report.selection, Selection::Marker);
        assert_eq!(report.considered, vec!["2025-03-26", "2025-06-18"]);
        assert_eq!(report.summary.pages_found, 3);
        assert_eq!(report.summary.pages_resolved, 2);
        assert_eq!(
            report.summary.missing_pages().collect::<Vec<_>>(),
            vec!["docs/specification/2025-06-18/server/prompts"]
        );
        assert_eq!(report.written, vec![temp.path().join("llms.txt")]);
        assert_eq!(
            fs::read_to_string(temp.path().join("llms.txt")).unwrap(),
            "# basic/lifecycle\n\nLifecycle body.\n\n---\n\n# server/tools\n\nTools body."
        );
        assert!(!temp.path().join("llms-full.txt").exists());
    }

    #[test]
    fn test_missing_page_names_navigation_reference() {
        let (_temp, config) = project("");

        let report = build(&config, false).unwrap();

        let lines: Vec<_> = report
            .summary
            .issues
            .iter()
            .map(|issue| report.describe_issue(issue))
            .collect();
        assert_eq!(
            lines,
            vec![
                "/server/prompts -> docs/specification/2025-06-18/server/prompts: no matching file"
            ]
        );
        assert!(!report.summary.is_complete());
    }

    #[test]
    fn test_build_full_appends_schema() {
        let (temp, config) = project("");

        let report = build(&config, true).unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(
            fs::read_to_string(temp.path().join("llms-full.txt")).unwrap(),
            "# basic/lifecycle\n\nLifecycle body.\n\n---\n\n# server/tools\n\nTools body.\n\n---\n\n# Schema (TypeScript)\n\n```typescript\nexport type Id = string;\n```"
        );
        assert_eq!(report.summary.missing_schema.len(), 1);
    }

    #[test]
    fn test_build_with_anchor_and_custom_output() {
        let (temp, config) = project(
            "[navigation]\ncurrent_marker = \"Stable\"\nanchor_version = \"2025-03-26\"\n\n[output]\nprimary = \"out/spec.txt\"\n",
        );
        write(
            temp.path(),
            "docs/specification/2025-03-26/basic/lifecycle.mdx",
            "Older lifecycle.",
        );

        let report = build(&config, false).unwrap();

        assert_eq!(report.version, "2025-03-26");
        assert_eq!(report.selection, Selection::Anchor);
        assert_eq!(
            fs::read_to_string(temp.path().join("out/spec.txt")).unwrap(),
            "# basic/lifecycle\n\nOlder lifecycle."
        );
    }

    #[test]
    fn test_build_fails_without_specification_tab() {
        let (_temp, config) = project("[navigation]\ntab = \"Reference\"\n");

        let err = build(&config, false).unwrap_err();

        assert!(matches!(err, CliError::Navigation(_)));
        assert!(err.to_string().contains("Reference"));
    }

    #[test]
    fn test_build_fails_without_navigation_file() {
        let (temp, config) = project("");
        fs::remove_file(temp.path().join("docs/docs.json")).unwrap();

        let err = build(&config, false).unwrap_err();

        assert!(matches!(err, CliError::Navigation(_)));
    }
}
