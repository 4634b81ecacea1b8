//! Request signing utilities.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tradebot_core::error::ConfigError;

type HmacSha256 = Hmac<Sha256>;

/// Request signer for exchange API authentication.
///
/// Binance signs the full query string with HMAC-SHA256 keyed by the API
/// secret and expects the hex digest in the `signature` parameter.
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl RequestSigner {
    /// Creates a signer for HMAC-SHA256 (hex output).
    #[must_use]
    pub fn hmac_sha256(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signs a message and returns the hex-encoded signature.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the key is rejected by the MAC.
    pub fn sign(&self, message: &str) -> Result<String, ConfigError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "api_secret".to_string(),
                reason: format!("Failed to create HMAC: {e}"),
            }
        })?;

        mac.update(message.as_bytes());
        let result = mac.finalize();
        Ok(hex::encode(result.into_bytes()))
    }

    /// Appends `&signature=<hex>` to a query string.
    pub fn sign_query(&self, query: &str) -> Result<String, ConfigError> {
        let signature = self.sign(query)?;
        if query.is_empty() {
            Ok(format!("signature={signature}"))
        } else {
            Ok(format!("{query}&signature={signature}"))
        }
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

/// Builds a query string from parameters.
///
/// Parameters keep the caller's order. The exchange verifies the signature
/// against the query exactly as sent.
#[must_use]
pub fn build_query_string(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Returns the current timestamp in milliseconds.
#[must_use]
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
