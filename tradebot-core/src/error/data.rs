//! Data-related error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Data error type for exchange payloads that could not be decoded.
///
/// # Examples
///
/// ```
/// use tradebot_core::error::DataError;
///
/// let error = DataError::Parse {
///     context: "mark price".to_string(),
///     reason: "missing field `markPrice`".to_string(),
/// };
/// assert!(error.to_string().contains("mark price"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataError {
    /// A response body could not be parsed.
    #[error("[Data] Failed to parse {context}: {reason}")]
    Parse {
        /// What was being parsed.
        context: String,
        /// Reason for the parse failure.
        reason: String,
    },

    /// A field parsed but holds an unusable value.
    #[error("[Data] Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Field holding the value.
        field: String,
        /// Reason why the value is unusable.
        reason: String,
    },
}

impl DataError {
    /// Creates a parse error from any displayable cause.
    #[must_use]
    pub fn parse(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            context: context.into(),
            reason: reason.to_string(),
        }
    }
}
