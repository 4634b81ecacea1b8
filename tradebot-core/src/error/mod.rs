//! Error types and handling framework.
//!
//! # Error Hierarchy
//!
//! - [`TradeError`] - Top-level error type
//!   - [`ConfigError`] - Missing credentials and bad environment overrides
//!   - [`OrderValidationError`] - Rejected before anything reaches the exchange
//!   - [`ExchangeError`] - The exchange answered with an API error code
//!   - [`NetworkError`] - Transport failures and unexpected HTTP statuses
//!   - [`DataError`] - Response bodies that could not be decoded
//!
//! Only data errors and recoverable network errors are treated as transient.
//! Everything else is surfaced to the operator as-is.
//!
//! ```
//! use tradebot_core::error::{NetworkError, TradeError};
//!
//! let error = TradeError::from(NetworkError::Timeout { timeout_ms: 5000 });
//! assert!(error.is_retryable());
//! assert_eq!(error.category(), "network");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error severity levels for categorizing errors.
///
/// - `Fatal`: the operation cannot succeed without operator action
/// - `Recoverable`: the operation may succeed if retried
/// - `Warning`: the exchange refused this particular request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Unrecoverable error requiring operator attention.
    Fatal,

    /// Error that can potentially be recovered from through retry.
    #[default]
    Recoverable,

    /// Request-level rejection that does not affect other requests.
    Warning,
}

impl ErrorSeverity {
    /// Returns the severity as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Recoverable => "RECOVERABLE",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

mod config;
mod data;
mod exchange;
mod network;
mod validation;

pub use config::ConfigError;
pub use data::DataError;
pub use exchange::{ApiErrorCode, ExchangeError};
pub use network::NetworkError;
pub use validation::OrderValidationError;

/// Top-level error type for the trading bot.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeError {
    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Order validation error.
    #[error("{0}")]
    Validation(#[from] OrderValidationError),

    /// Exchange API error.
    #[error("{0}")]
    Exchange(#[from] ExchangeError),

    /// Network-related error.
    #[error("{0}")]
    Network(#[from] NetworkError),

    /// Response decoding error.
    #[error("{0}")]
    Data(#[from] DataError),

    /// Every attempt failed with a transient error.
    #[error("Max retries exceeded. ({attempts} attempts)")]
    RetriesExhausted {
        /// Number of attempts that were made.
        attempts: u32,
    },
}

impl TradeError {
    /// Returns true if the failed operation may be attempted again.
    ///
    /// Data errors and recoverable network errors are transient. An HTTP
    /// error with a 4xx status, exchange rejections, validation and
    /// configuration errors are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_recoverable(),
            Self::Data(_) => true,
            _ => false,
        }
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::RetriesExhausted { .. } => {
                ErrorSeverity::Fatal
            }
            Self::Exchange(e) => e.severity(),
            Self::Network(e) => e.severity(),
            Self::Data(_) => ErrorSeverity::Recoverable,
        }
    }

    /// Returns the error category as a string.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::Exchange(_) => "exchange",
            Self::Network(_) => "network",
            Self::Data(_) => "data",
            Self::RetriesExhausted { .. } => "retry",
        }
    }

    /// Returns the inner exchange error, if this is an exchange error.
    #[must_use]
    pub fn as_exchange_error(&self) -> Option<&ExchangeError> {
        match self {
            Self::Exchange(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the inner validation error, if this is a validation error.
    #[must_use]
    pub fn as_validation_error(&self) -> Option<&OrderValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::types::ValidationError> for TradeError {
    fn from(err: crate::types::ValidationError) -> Self {
        Self::Validation(OrderValidationError::from(err))
    }
}
