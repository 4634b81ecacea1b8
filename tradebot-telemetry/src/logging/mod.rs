//! Logging system for tradebot.
//!
//! Provides:
//! - An append-only log file sink
//! - Optional stderr mirror for verbose runs
//! - `RUST_LOG` or configured level filtering
//! - Sensitive data masking

mod config;
mod formatter;

pub use config::{DEFAULT_LOG_FILE, LogConfig};
pub use formatter::{LineFormat, format_level, format_timestamp};

use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::masking::SensitiveDataMasker;

/// Type-erased subscriber returned by [`build_subscriber`].
pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync + 'static>;

/// Builds a subscriber for the given configuration without installing it.
///
/// The guard, when present, flushes the file sink on drop and must be kept
/// alive for as long as events should reach the file.
pub fn build_subscriber(
    config: &LogConfig,
) -> Result<(BoxedSubscriber, Option<WorkerGuard>), LoggingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| LoggingError::InvalidFilter {
            level: config.level.clone(),
            reason: e.to_string(),
        })?,
    };

    let format = if config.mask_secrets {
        LineFormat::new().with_masker(SensitiveDataMasker::new())
    } else {
        LineFormat::new()
    };

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_append(path)?);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .event_format(format.clone());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = config.console.then(|| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .event_format(format)
    });

    let subscriber: BoxedSubscriber = Box::new(
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(console_layer),
    );

    Ok((subscriber, guard))
}

/// Builds the subscriber and installs it as the global default.
///
/// # Example
///
/// ```no_run
/// use tradebot_telemetry::logging::{LogConfig, init_logging};
///
/// let _guard = init_logging(&LogConfig::default()).expect("logging");
/// tracing::info!("started");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let (subscriber, guard) = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;
    Ok(guard)
}

fn open_append(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::FileOpen {
            path: path.display().to_string(),
            reason: "path has no file name".to_string(),
        })?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|e| LoggingError::FileOpen {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened
    #[error("Failed to open log file {path}: {reason}")]
    FileOpen {
        /// Log file path
        path: String,
        /// Underlying error
        reason: String,
    },

    /// The level directive could not be parsed
    #[error("Invalid log level '{level}': {reason}")]
    InvalidFilter {
        /// Rejected directive
        level: String,
        /// Parser error
        reason: String,
    },

    /// A global subscriber is already installed
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}
