//! CLI error types.

use spectext_bundle::BundleError;
use spectext_config::ConfigError;
use spectext_nav::NavigationError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("{0}")]
    Bundle(#[from] BundleError),
}
