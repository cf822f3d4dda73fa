//! Configuration management for spectext.
//!
//! Parses `spectext.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Without a config
//! file every setting falls back to the layout of a versioned specification
//! repository:
//!
//! ```text
//! docs/docs.json                              navigation
//! docs/specification/<version>/**/*.mdx       specification pages
//! schema/<version>/schema.{ts,json}           schema artifacts
//! llms.txt, llms-full.txt                     outputs
//! ```
//!
//! Directory settings under `[docs]` and `[schema]` are `/`-separated paths
//! relative to the project directory and may contain a `{version}` placeholder
//! that is substituted with the selected version.
//!
//! ## Environment Variable Expansion
//!
//! Path values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `navigation.file`
//! - `docs.docs_dir`
//! - `docs.spec_dir`
//! - `schema.dir`
//! - `output.primary`
//! - `output.full`

mod expand;

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the specification tab label.
    pub tab: Option<String>,
    /// Override the anchor version token.
    pub anchor_version: Option<String>,
    /// Override the primary artifact path.
    pub primary_output: Option<PathBuf>,
    /// Override the supplementary artifact path.
    pub full_output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "spectext.toml";

static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Navigation file and version selection rules.
    pub navigation: NavigationConfig,
    /// Document layout.
    pub docs: DocsConfig,
    /// Schema artifact layout.
    pub schema: SchemaConfig,
    /// Output locations (relative strings from TOML).
    output: OutputConfigRaw,

    /// Project directory all relative paths are resolved against (set after loading).
    #[serde(skip)]
    pub project_dir: PathBuf,
    /// Absolute path to the navigation file (set after loading).
    #[serde(skip)]
    pub navigation_file: PathBuf,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Navigation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Navigation file, relative to the project directory.
    pub file: String,
    /// Label of the tab holding the specification versions.
    pub tab: String,
    /// Marker token identifying the current version group.
    pub current_marker: String,
    /// Version token that always identifies the current group when present.
    pub anchor_version: Option<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            file: "docs/docs.json".to_owned(),
            tab: "Specification".to_owned(),
            current_marker: "Latest".to_owned(),
            anchor_version: None,
        }
    }
}

/// Document layout configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Base directory for relative page references.
    pub docs_dir: String,
    /// Specification root for absolute page references (may contain `{version}`).
    pub spec_dir: String,
    /// Prefix marking a page reference as absolute.
    pub root_marker: String,
    /// Document extensions tried in order, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_owned(),
            spec_dir: "docs/specification/{version}".to_owned(),
            root_marker: "/".to_owned(),
            extensions: vec!["mdx".to_owned(), "md".to_owned()],
        }
    }
}

/// Schema artifact configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Directory holding the schema pair (may contain `{version}`).
    pub dir: String,
    /// Type-definition source file name.
    pub source_file: String,
    /// Generated JSON schema file name.
    pub json_file: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            dir: "schema/{version}".to_owned(),
            source_file: "schema.ts".to_owned(),
            json_file: "schema.json".to_owned(),
        }
    }
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    primary: Option<String>,
    full: Option<String>,
}

/// Resolved output locations with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Primary artifact, always written.
    pub primary: PathBuf,
    /// Supplementary artifact, written only on request.
    pub full: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`navigation.file`").
        field: String,
        /// Error message (e.g., "${`SPEC_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a layout directory to stay inside the project directory.
///
/// Pages and schemas are looked up relative to the project directory, so an
/// absolute path or a `..` component could never resolve.
fn require_project_relative(value: &str, field: &str) -> Result<(), ConfigError> {
    let escapes = Path::new(value).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(ConfigError::Validation(format!(
            "{field} must be relative to the project directory, got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `spectext.toml` in current directory and parents,
    /// falling back to defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the configuration is invalid after applying CLI settings.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Relative output paths are taken as given (relative to the working directory).
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(tab) = &settings.tab {
            self.navigation.tab.clone_from(tab);
        }
        if let Some(anchor_version) = &settings.anchor_version {
            self.navigation.anchor_version = Some(anchor_version.clone());
        }
        if let Some(primary) = &settings.primary_output {
            self.output_resolved.primary.clone_from(primary);
        }
        if let Some(full) = &settings.full_output {
            self.output_resolved.full.clone_from(full);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            navigation: NavigationConfig::default(),
            docs: DocsConfig::default(),
            schema: SchemaConfig::default(),
            output: OutputConfigRaw::default(),
            project_dir: PathBuf::new(),
            navigation_file: PathBuf::new(),
            output_resolved: OutputConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_navigation()?;
        self.validate_docs()?;
        require_non_empty(&self.schema.source_file, "schema.source_file")?;
        require_non_empty(&self.schema.json_file, "schema.json_file")?;
        Ok(())
    }

    /// Validate navigation configuration.
    fn validate_navigation(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.navigation.file, "navigation.file")?;
        require_non_empty(&self.navigation.tab, "navigation.tab")?;
        require_non_empty(&self.navigation.current_marker, "navigation.current_marker")?;

        if let Some(anchor) = &self.navigation.anchor_version
            && !DATE_TOKEN.is_match(anchor)
        {
            return Err(ConfigError::Validation(format!(
                "navigation.anchor_version must look like YYYY-MM-DD, got {anchor:?}"
            )));
        }

        Ok(())
    }

    /// Validate document layout configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.docs.root_marker, "docs.root_marker")?;
        require_project_relative(&self.docs.docs_dir, "docs.docs_dir")?;
        require_project_relative(&self.docs.spec_dir, "docs.spec_dir")?;
        require_project_relative(&self.schema.dir, "schema.dir")?;

        if self.docs.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "docs.extensions cannot be empty".to_owned(),
            ));
        }
        if let Some(ext) = self
            .docs
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "docs.extensions entries must be non-empty and without a leading dot, got {ext:?}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in path values.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.navigation.file = expand::expand_env(&self.navigation.file, "navigation.file")?;
        self.docs.docs_dir = expand::expand_env(&self.docs.docs_dir, "docs.docs_dir")?;
        self.docs.spec_dir = expand::expand_env(&self.docs.spec_dir, "docs.spec_dir")?;
        self.schema.dir = expand::expand_env(&self.schema.dir, "schema.dir")?;

        if let Some(ref primary) = self.output.primary {
            self.output.primary = Some(expand::expand_env(primary, "output.primary")?);
        }
        if let Some(ref full) = self.output.full {
            self.output.full = Some(expand::expand_env(full, "output.full")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on the project directory.
    fn resolve_paths(&mut self, project_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| project_dir.join(path.unwrap_or(default));

        self.project_dir = project_dir.to_path_buf();
        self.navigation_file = project_dir.join(&self.navigation.file);
        self.output_resolved = OutputConfig {
            primary: resolve(self.output.primary.as_deref(), "llms.txt"),
            full: resolve(self.output.full.as_deref(), "llms-full.txt"),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.navigation.tab, "Specification");
        assert_eq!(config.navigation.current_marker, "Latest");
        assert!(config.navigation.anchor_version.is_none());
        assert_eq!(
            config.navigation_file,
            PathBuf::from("/test/docs/docs.json")
        );
        assert_eq!(config.docs.docs_dir, "docs");
        assert_eq!(config.docs.spec_dir, "docs/specification/{version}");
        assert_eq!(config.docs.extensions, vec!["mdx", "md"]);
        assert_eq!(config.schema.dir, "schema/{version}");
        assert_eq!(
            config.output_resolved.primary,
            PathBuf::from("/test/llms.txt")
        );
        assert_eq!(
            config.output_resolved.full,
            PathBuf::from("/test/llms-full.txt")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.navigation.file, "docs/docs.json");
        assert_eq!(config.docs.root_marker, "/");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[navigation]
file = "site/nav.json"
tab = "Spec"
current_marker = "Current"
anchor_version = "2025-06-18"

[docs]
docs_dir = "site"
spec_dir = "site/spec/{version}"
root_marker = "spec:"
extensions = ["md"]

[schema]
dir = "types/{version}"
source_file = "types.ts"
json_file = "types.json"

[output]
primary = "dist/spec.txt"
full = "dist/spec-full.txt"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.navigation.tab, "Spec");
        assert_eq!(config.navigation.current_marker, "Current");
        assert_eq!(config.navigation.anchor_version.as_deref(), Some("2025-06-18"));
        assert_eq!(config.navigation_file, PathBuf::from("/project/site/nav.json"));
        assert_eq!(config.docs.root_marker, "spec:");
        assert_eq!(config.docs.extensions, vec!["md"]);
        assert_eq!(config.schema.source_file, "types.ts");
        assert_eq!(
            config.output_resolved.primary,
            PathBuf::from("/project/dist/spec.txt")
        );
        assert_eq!(
            config.output_resolved.full,
            PathBuf::from("/project/dist/spec-full.txt")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_invalid_anchor_version() {
        let toml = r#"
[navigation]
anchor_version = "latest"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("navigation.anchor_version"));
    }

    #[test]
    fn test_validate_rejects_empty_tab() {
        let toml = r#"
[navigation]
tab = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("navigation.tab cannot be empty"));
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let toml = r#"
[docs]
extensions = [".mdx"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("docs.extensions"));
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let toml = r"
[docs]
extensions = []
";
        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_directories_outside_project() {
        for (toml, field) in [
            ("[docs]\nspec_dir = \"/srv/spec/{version}\"\n", "docs.spec_dir"),
            ("[docs]\ndocs_dir = \"../docs\"\n", "docs.docs_dir"),
            ("[schema]\ndir = \"schema/../../{version}\"\n", "schema.dir"),
        ] {
            let config: Config = toml::from_str(toml).unwrap();
            let err = config.validate().unwrap_err();

            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(err.to_string().contains(field), "{err}");
        }
    }

    #[test]
    fn test_validate_accepts_empty_spec_dir() {
        let config: Config = toml::from_str("[docs]\nspec_dir = \"\"\n").unwrap();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_absolute_spec_dir_from_env() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("spectext.toml");
        std::fs::write(
            &config_path,
            "[docs]\nspec_dir = \"${SPECTEXT_TEST_PROJECT_ROOT}/docs/specification/{version}\"\n",
        )
        .unwrap();
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SPECTEXT_TEST_PROJECT_ROOT", temp_dir.path());
        }

        let result = Config::load(Some(&config_path), None);

        unsafe {
            std::env::remove_var("SPECTEXT_TEST_PROJECT_ROOT");
        }
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("docs.spec_dir"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/spectext.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("spectext.toml");
        std::fs::write(
            &config_path,
            "[navigation]\nfile = \"nav/docs.json\"\n\n[output]\nprimary = \"out/llms.txt\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.project_dir, temp_dir.path());
        assert_eq!(
            config.navigation_file,
            temp_dir.path().join("nav/docs.json")
        );
        assert_eq!(
            config.output_resolved.primary,
            temp_dir.path().join("out/llms.txt")
        );
        assert_eq!(
            config.output_resolved.full,
            temp_dir.path().join("llms-full.txt")
        );
        assert_eq!(config.config_path.as_deref(), Some(config_path.as_path()));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            anchor_version: Some("2025-03-26".to_owned()),
            primary_output: Some(PathBuf::from("/out/spec.txt")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.navigation.tab, "Specification"); // Unchanged
        assert_eq!(config.navigation.anchor_version.as_deref(), Some("2025-03-26"));
        assert_eq!(config.output_resolved.primary, PathBuf::from("/out/spec.txt"));
        assert_eq!(
            config.output_resolved.full,
            PathBuf::from("/test/llms-full.txt")
        );
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("spectext.toml");
        std::fs::write(&config_path, "").unwrap();
        let overrides = CliSettings {
            anchor_version: Some("June".to_owned()),
            ..Default::default()
        };

        let result = Config::load(Some(&config_path), Some(&overrides));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_from_file_reports_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("spectext.toml");
        std::fs::write(&config_path, "[navigation\n").unwrap();

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
