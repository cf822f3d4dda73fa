//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SPECTEXT_TEST_ROOT", "/srv/spec");
        }
        let result = expand_env("${SPECTEXT_TEST_ROOT}/docs.json", "navigation.file").unwrap();
        assert_eq!(result, "/srv/spec/docs.json");
        unsafe {
            std::env::remove_var("SPECTEXT_TEST_ROOT");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SPECTEXT_UNSET_OUT");
        }
        let result = expand_env("${SPECTEXT_UNSET_OUT:-dist}/llms.txt", "output.primary").unwrap();
        assert_eq!(result, "dist/llms.txt");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SPECTEXT_MISSING_VAR");
        }
        let result = expand_env("${SPECTEXT_MISSING_VAR}", "schema.dir");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SPECTEXT_MISSING_VAR"));
        assert!(err.to_string().contains("schema.dir"));
    }

    #[test]
    fn test_version_placeholder_unchanged() {
        let result = expand_env("docs/specification/{version}", "docs.spec_dir").unwrap();
        assert_eq!(result, "docs/specification/{version}");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("$HOME/docs", "docs.docs_dir").unwrap();
        assert_eq!(result, "$HOME/docs");
    }
}
