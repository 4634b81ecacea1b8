//! Configuration-related error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error type covering missing credentials, invalid
/// environment overrides and unreadable env files.
///
/// # Examples
///
/// ```
/// use tradebot_core::error::ConfigError;
///
/// let error = ConfigError::MissingEnvVar {
///     name: "BINANCE_API_KEY".to_string(),
/// };
/// assert!(error.to_string().contains("BINANCE_API_KEY"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    /// Environment variable is missing or empty.
    #[error("[Config] API credentials not found in environment variables: {name}")]
    MissingEnvVar {
        /// Name of the missing environment variable.
        name: String,
    },

    /// Environment variable has invalid value.
    #[error("[Config] Invalid environment variable '{name}': {reason}")]
    InvalidEnvVar {
        /// Name of the environment variable.
        name: String,
        /// Reason why the value is invalid.
        reason: String,
    },

    /// Configuration value is invalid.
    #[error("[Config] Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Field with the invalid value.
        field: String,
        /// Reason why the value is invalid.
        reason: String,
    },

    /// An env file could not be read or parsed.
    #[error("[Config] Failed to read file '{path}': {reason}")]
    FileReadError {
        /// Path to the env file.
        path: String,
        /// Reason for the read failure.
        reason: String,
    },
}

impl ConfigError {
    /// Returns the offending environment variable or field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::MissingEnvVar { name } | Self::InvalidEnvVar { name, .. } => name,
            Self::InvalidValue { field, .. } => field,
            Self::FileReadError { path, .. } => path,
        }
    }
}
