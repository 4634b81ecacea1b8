//! Exchange-related error types.
//!
//! The exchange reports request failures as `{"code": -2019, "msg": "..."}`.
//! [`ExchangeError::Api`] carries that payload unmodified, and
//! [`ApiErrorCode`] maps the codes an operator commonly hits to a short
//! explanation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Exchange error type for requests the exchange rejected.
///
/// # Examples
///
/// ```
/// use tradebot_core::error::{ApiErrorCode, ExchangeError};
///
/// let error = ExchangeError::Api {
///     code: -2019,
///     message: "Margin is insufficient.".to_string(),
/// };
/// assert_eq!(error.known_code(), Some(ApiErrorCode::InsufficientMargin));
/// assert_eq!(error.classify(), "Insufficient margin.");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeError {
    /// The exchange returned an error payload.
    #[error("[Exchange] API error (code={code}): {message}")]
    Api {
        /// Numeric error code from the exchange.
        code: i32,
        /// Raw error message from the exchange.
        message: String,
    },
}

impl ExchangeError {
    /// Returns the exchange error code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Api { code, .. } => *code,
        }
    }

    /// Returns the raw exchange message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Api { message, .. } => message,
        }
    }

    /// Returns the known error code, if the code is one of the classified ones.
    #[must_use]
    pub fn known_code(&self) -> Option<ApiErrorCode> {
        ApiErrorCode::from_code(self.code())
    }

    /// Returns the operator-facing explanation for this error.
    ///
    /// Unknown codes pass the raw exchange message through.
    #[must_use]
    pub fn classify(&self) -> String {
        match self.known_code() {
            Some(known) => known.operator_message().to_string(),
            None => format!("Binance API error: {}", self.message()),
        }
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        match self.known_code() {
            Some(ApiErrorCode::InvalidApiKey) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Warning,
        }
    }
}

/// Error codes with a dedicated operator message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiErrorCode {
    /// `-2015`: invalid API key, IP or permissions.
    InvalidApiKey,
    /// `-2019`: margin is insufficient.
    InsufficientMargin,
    /// `-4164`: order notional below the exchange minimum.
    NotionalTooSmall,
    /// `-2021`: stop order would trigger immediately.
    WouldImmediatelyTrigger,
}

impl ApiErrorCode {
    const TABLE: [(i32, Self); 4] = [
        (-2015, Self::InvalidApiKey),
        (-2019, Self::InsufficientMargin),
        (-4164, Self::NotionalTooSmall),
        (-2021, Self::WouldImmediatelyTrigger),
    ];

    /// Looks up a numeric exchange code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, variant)| *variant)
    }

    /// Returns the numeric exchange code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::InvalidApiKey => -2015,
            Self::InsufficientMargin => -2019,
            Self::NotionalTooSmall => -4164,
            Self::WouldImmediatelyTrigger => -2021,
        }
    }

    /// Returns the operator-facing message.
    #[must_use]
    pub const fn operator_message(self) -> &'static str {
        match self {
            Self::InvalidApiKey => "Invalid API key.",
            Self::InsufficientMargin => "Insufficient margin.",
            Self::NotionalTooSmall => "Order notional must be >= 100 USDT.",
            Self::WouldImmediatelyTrigger => "Order would immediately trigger.",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorSeverity;

    fn api(code: i32, message: &str) -> ExchangeError {
        ExchangeError::Api {
            code,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_known_codes_classify() {
        assert_eq!(api(-2015, "Invalid API-key").classify(), "Invalid API key.");
        assert_eq!(api(-2019, "Margin is insufficient.").classify(), "Insufficient margin.");
        assert_eq!(
            api(-4164, "Order's notional must be no smaller than 100").classify(),
            "Order notional must be >= 100 USDT."
        );
        assert_eq!(
            api(-2021, "Order would immediately trigger.").classify(),
            "Order would immediately trigger."
        );
    }

    #[test]
    fn test_unknown_code_passes_raw_message() {
        let error = api(-1121, "Invalid symbol.");
        assert_eq!(error.known_code(), None);
        assert_eq!(error.classify(), "Binance API error: Invalid symbol.");
    }

    #[test]
    fn test_code_table_is_consistent() {
        for (code, variant) in ApiErrorCode::TABLE {
            assert_eq!(variant.code(), code);
            assert_eq!(ApiErrorCode::from_code(code), Some(variant));
        }
    }

    #[test]
    fn test_display_keeps_raw_payload() {
        let error = api(-2019, "Margin is insufficient.");
        assert_eq!(
            error.to_string(),
            "[Exchange] API error (code=-2019): Margin is insufficient."
        );
        assert_eq!(error.code(), -2019);
        assert_eq!(error.message(), "Margin is insufficient.");
    }

    #[test]
    fn test_severity() {
        assert_eq!(api(-2015, "").severity(), ErrorSeverity::Fatal);
        assert_eq!(api(-2019, "").severity(), ErrorSeverity::Warning);
        assert_eq!(api(-1000, "").severity(), ErrorSeverity::Warning);
    }
}
