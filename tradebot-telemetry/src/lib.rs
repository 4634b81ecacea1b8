//! # Tradebot Telemetry
//!
//! Logging for the tradebot futures order tool.
//!
//! This crate provides:
//! - Log configuration and subscriber construction
//! - An append-only log file with `timestamp - LEVEL - target - message` lines
//! - Masking of API keys, secrets and request signatures in log output
//!
//! Library crates only emit `tracing` events. The binary builds the
//! subscriber from a [`logging::LogConfig`] and installs it once.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

/// Logging configuration and initialization
pub mod logging;

/// Sensitive data masking
pub mod masking;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::logging::{LogConfig, LoggingError, build_subscriber, init_logging};
    pub use crate::masking::SensitiveDataMasker;
}
