//! Environment variable overrides.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable override helper.
///
/// Unset and empty variables leave the target untouched. Values that are
/// set but do not parse are reported instead of silently ignored.
///
/// # Example
///
/// ```
/// use tradebot_core::config::EnvOverride;
///
/// let mut timeout_ms = 30_000_u64;
/// EnvOverride::apply_number("TRADEBOT_UNSET_EXAMPLE_VAR", &mut timeout_ms).unwrap();
/// assert_eq!(timeout_ms, 30_000);
/// ```
pub struct EnvOverride;

impl EnvOverride {
    /// Reads a variable, treating empty values as unset.
    #[must_use]
    pub fn get(var_name: &str) -> Option<String> {
        std::env::var(var_name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Reads a variable that must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if the variable is unset or empty.
    pub fn require(var_name: &str) -> Result<String, ConfigError> {
        Self::get(var_name).ok_or_else(|| ConfigError::MissingEnvVar {
            name: var_name.to_string(),
        })
    }

    /// Applies an environment variable override to a string value.
    pub fn apply_string(var_name: &str, target: &mut String) {
        if let Some(value) = Self::get(var_name) {
            *target = value;
        }
    }

    /// Applies an environment variable override to a numeric value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the value does not parse.
    pub fn apply_number<T>(var_name: &str, target: &mut T) -> Result<(), ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        if let Some(value) = Self::get(var_name) {
            *target = value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
                name: var_name.to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set(name: &str, value: &str) {
        // SAFETY: env-mutating tests are serialized with #[serial].
        unsafe { std::env::set_var(name, value) };
    }

    fn unset(name: &str) {
        // SAFETY: env-mutating tests are serialized with #[serial].
        unsafe { std::env::remove_var(name) };
    }

    #[test]
    fn test_env_override_unset_is_noop() {
        let mut value = "default".to_string();
        EnvOverride::apply_string("TRADEBOT_NONEXISTENT_VAR_12345", &mut value);
        assert_eq!(value, "default");

        let mut number = 7_u64;
        EnvOverride::apply_number("TRADEBOT_NONEXISTENT_VAR_12345", &mut number).unwrap();
        assert_eq!(number, 7);
    }

    #[test]
    #[serial]
    fn test_env_override_number() {
        set("TRADEBOT_TEST_NUMBER", "1500");
        let mut number = 0_u64;
        EnvOverride::apply_number("TRADEBOT_TEST_NUMBER", &mut number).unwrap();
        assert_eq!(number, 1500);

        set("TRADEBOT_TEST_NUMBER", "fast");
        let err = EnvOverride::apply_number("TRADEBOT_TEST_NUMBER", &mut number).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
        assert_eq!(number, 1500);
        unset("TRADEBOT_TEST_NUMBER");
    }

    #[test]
    #[serial]
    fn test_env_override_empty_counts_as_unset() {
        set("TRADEBOT_TEST_EMPTY", "  ");
        assert!(EnvOverride::get("TRADEBOT_TEST_EMPTY").is_none());
        assert!(matches!(
            EnvOverride::require("TRADEBOT_TEST_EMPTY"),
            Err(ConfigError::MissingEnvVar { .. })
        ));
        unset("TRADEBOT_TEST_EMPTY");
    }
}
