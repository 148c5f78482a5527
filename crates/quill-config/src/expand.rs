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

    // Unset variables without a default are left in place by the expansion.
    let expanded = shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok());
    if let Some(start) = expanded.find("${") {
        let name = expanded[start + 2..]
            .split(['}', ':'])
            .next()
            .unwrap_or_default();
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        });
    }

    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUILL_TEST_VAR_SIMPLE", "hello");
        }
        let result = expand_env("${QUILL_TEST_VAR_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("QUILL_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUILL_TEST_VAR_DEFAULT", "hello");
        }
        let result = expand_env("${QUILL_TEST_VAR_DEFAULT:-world}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("QUILL_TEST_VAR_DEFAULT");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUILL_UNSET_VAR_TEST");
        }
        let result = expand_env("${QUILL_UNSET_VAR_TEST:-default}", "test.field").unwrap();
        assert_eq!(result, "default");
    }

    #[test]
    fn test_expand_missing_var_errors() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUILL_MISSING_VAR_TEST");
        }
        let err = expand_env("http://${QUILL_MISSING_VAR_TEST}/api", "gateway.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("QUILL_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("gateway.base_url"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUILL_TEST_API_HOST", "cms.internal");
        }
        let result = expand_env("https://${QUILL_TEST_API_HOST}/api", "test.field").unwrap();
        assert_eq!(result, "https://cms.internal/api");
        unsafe {
            std::env::remove_var("QUILL_TEST_API_HOST");
        }
    }

    #[test]
    fn test_no_expansion_needed() {
        assert_eq!(expand_env("plain", "test.field").unwrap(), "plain");
    }
}
