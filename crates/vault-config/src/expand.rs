//! Environment variable expansion for configuration strings.

use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a URL field.
///
/// Strings without `${` are returned as-is, so bare `$` in a URL survives.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env(value).map_err(|e| {
        let reason = match e.cause {
            VarError::NotPresent => "not set",
            VarError::NotUnicode(_) => "not valid UTF-8",
        };
        ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} {reason}", e.var_name),
        }
    })?;
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("http://127.0.0.1:8000", "sources.manifest_url").unwrap();
        assert_eq!(result, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VAULT_EXPAND_HOST", "vault.example.com");
        }
        let result =
            expand_env("https://${VAULT_EXPAND_HOST}/manifest.json", "sources.manifest_url")
                .unwrap();
        assert_eq!(result, "https://vault.example.com/manifest.json");
        unsafe {
            std::env::remove_var("VAULT_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("VAULT_EXPAND_UNSET");
        }
        let result = expand_env("${VAULT_EXPAND_UNSET:-http://localhost}", "field").unwrap();
        assert_eq!(result, "http://localhost");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("VAULT_EXPAND_MISSING");
        }
        let err = expand_env("${VAULT_EXPAND_MISSING}", "sources.content_base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("VAULT_EXPAND_MISSING"));
        assert!(err.to_string().contains("sources.content_base_url"));
    }
}
