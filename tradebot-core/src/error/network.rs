//! Network-related error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Network error type covering connection failures, timeouts and
/// responses whose body could not be read.
///
/// # Examples
///
/// ```
/// use tradebot_core::error::NetworkError;
///
/// let error = NetworkError::ConnectionFailed {
///     reason: "Connection refused".to_string(),
/// };
/// assert!(error.to_string().contains("Connection refused"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkError {
    /// Connection to remote host failed.
    #[error("[Network] Connection failed: {reason}")]
    ConnectionFailed {
        /// Reason for the connection failure.
        reason: String,
    },

    /// Request timed out.
    #[error("[Network] Connection timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// HTTP request failed.
    #[error("[Network] HTTP error: status {status_code} - {reason}")]
    Http {
        /// HTTP status code, 0 when no response was received.
        status_code: u16,
        /// Reason for the HTTP error.
        reason: String,
    },
}

impl NetworkError {
    /// Returns true if this error is recoverable (can be retried).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::ConnectionFailed { .. } => true,
            Self::Http { status_code, .. } => *status_code == 0 || *status_code >= 500,
        }
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        if self.is_recoverable() {
            ErrorSeverity::Recoverable
        } else {
            ErrorSeverity::Warning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorSeverity;

    #[test]
    fn test_timeout() {
        let error = NetworkError::Timeout { timeout_ms: 5000 };
        assert!(error.to_string().contains("5000ms"));
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_http_error_severity() {
        let server = NetworkError::Http {
            status_code: 502,
            reason: "Bad Gateway".to_string(),
        };
        assert_eq!(server.severity(), ErrorSeverity::Recoverable);

        let client = NetworkError::Http {
            status_code: 404,
            reason: "Not Found".to_string(),
        };
        assert!(!client.is_recoverable());
        assert_eq!(client.severity(), ErrorSeverity::Warning);
        assert!(client.to_string().contains("404"));
    }
}
