//! Application configuration loaded from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::env::EnvOverride;
use crate::error::ConfigError;
use crate::traits::{API_KEY_VAR, API_SECRET_VAR, Credentials};

/// Binance USDT-M futures testnet REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://testnet.binancefuture.com";
/// Default request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default validity window for signed requests.
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5_000;

const BASE_URL_VAR: &str = "TRADEBOT_BASE_URL";
const TIMEOUT_VAR: &str = "TRADEBOT_TIMEOUT_MS";
const RECV_WINDOW_VAR: &str = "TRADEBOT_RECV_WINDOW_MS";
const LOG_LEVEL_VAR: &str = "TRADEBOT_LOG_LEVEL";

/// Runtime settings other than credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// REST base URL.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `recvWindow` sent with signed requests, in milliseconds.
    pub recv_window_ms: u64,
    /// Default log level filter.
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            recv_window_ms: DEFAULT_RECV_WINDOW_MS,
            log_level: "info".to_string(),
        }
    }
}

impl BotConfig {
    /// Builds the configuration from defaults plus `TRADEBOT_*` overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparsable numbers and
    /// `ConfigError::InvalidValue` if the result fails [`BotConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        EnvOverride::apply_string(BASE_URL_VAR, &mut config.base_url);
        EnvOverride::apply_number(TIMEOUT_VAR, &mut config.timeout_ms)?;
        EnvOverride::apply_number(RECV_WINDOW_VAR, &mut config.recv_window_ms)?;
        EnvOverride::apply_string(LOG_LEVEL_VAR, &mut config.log_level);
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        // The exchange caps recvWindow at 60 seconds.
        if self.recv_window_ms == 0 || self.recv_window_ms > 60_000 {
            return Err(ConfigError::InvalidValue {
                field: "recv_window_ms".to_string(),
                reason: format!("must be in 1..=60000, got {}", self.recv_window_ms),
            });
        }
        Ok(())
    }

    /// Returns the request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Reads `BINANCE_API_KEY` and `BINANCE_API_SECRET`.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if either is unset or empty.
pub fn credentials_from_env() -> Result<Credentials, ConfigError> {
    let api_key = EnvOverride::require(API_KEY_VAR)?;
    let api_secret = EnvOverride::require(API_SECRET_VAR)?;
    Ok(Credentials::new(api_key, api_secret))
}

/// Loads variables from an env file into the process environment.
///
/// Variables already set in the environment win. A missing file is not an
/// error; returns whether a file was loaded.
///
/// # Errors
///
/// Returns `ConfigError::FileReadError` if the file exists but cannot be
/// read or parsed.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }
    dotenvy::from_path(path).map_err(|e| ConfigError::FileReadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(true)
}
