//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports `${VAR}` (errors if unset) and `${VAR:-default}`. Bare `$VAR`
/// without braces is left alone, so URLs containing dollar signs survive.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: nothing to expand
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVariable> {
        std::env::var(var).map(Some).map_err(|_| UnsetVariable {
            name: var.to_owned(),
        })
    })
    .map(|expanded| expanded.into_owned())
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.cause.name),
    })
}

/// Lookup failure carrying the variable name for the error message.
struct UnsetVariable {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal_and_bare_dollar_pass_through() {
        assert_eq!(expand_env("plain text", "f").unwrap(), "plain text");
        assert_eq!(expand_env("$HOME/no-braces", "f").unwrap(), "$HOME/no-braces");
    }

    #[test]
    fn set_variable_expands_inside_larger_string() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CONSITE_EXPAND_HOST", "wiki.example.com");
        }
        let expanded = expand_env("https://${CONSITE_EXPAND_HOST}/path", "f").unwrap();
        assert_eq!(expanded, "https://wiki.example.com/path");
        unsafe {
            std::env::remove_var("CONSITE_EXPAND_HOST");
        }
    }

    #[test]
    fn default_applies_when_unset() {
        let expanded = expand_env("${CONSITE_EXPAND_UNSET:-fallback}", "f").unwrap();
        assert_eq!(expanded, "fallback");
    }

    #[test]
    fn unset_without_default_reports_field_and_variable() {
        let err = expand_env("${CONSITE_EXPAND_MISSING}", "confluence.password").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("confluence.password"));
        assert!(message.contains("CONSITE_EXPAND_MISSING"));
    }
}
