//! Logging configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default log file, created in the working directory.
pub const DEFAULT_LOG_FILE: &str = "trading_bot.log";

/// Configuration for the logging system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file, opened in append mode. `None` disables the file sink.
    #[serde(default = "default_file")]
    pub file: Option<PathBuf>,

    /// Also write log lines to stderr
    #[serde(default)]
    pub console: bool,

    /// Mask API keys, secrets and signatures in log lines
    #[serde(default = "default_mask_secrets")]
    pub mask_secrets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_file(),
            console: false,
            mask_secrets: default_mask_secrets(),
        }
    }
}

impl LogConfig {
    /// Sets the level filter directive.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Sets or clears the log file.
    #[must_use]
    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = file;
        self
    }

    /// Enables debug output mirrored to stderr.
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.level = "debug".to_string();
        self.console = true;
        self
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_file() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_LOG_FILE))
}

fn default_mask_secrets() -> bool {
    true
}
