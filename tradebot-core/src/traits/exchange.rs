//! Exchange trait definitions.
//!
//! The order service talks to the exchange only through
//! [`FuturesExchange`], so tests substitute a scripted implementation.
//!
//! # Example
//!
//! ```ignore
//! use tradebot_core::traits::FuturesExchange;
//!
//! struct PaperExchange { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl FuturesExchange for PaperExchange {
//!     async fn place_order(&self, params: &OrderParams) -> Result<OrderResponse, TradeError> {
//!         // Fill immediately at the last known price
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use std::fmt;

use crate::data::{AccountStatus, OrderParams, OrderResponse};
use crate::error::{ConfigError, TradeError};
use crate::types::{MarkPrice, Symbol};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
/// Environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";

/// Authentication credentials for the exchange API.
///
/// The secret is only reachable through [`Credentials::api_secret`] and is
/// never printed by `Debug`.
///
/// # Examples
///
/// ```
/// use tradebot_core::traits::Credentials;
///
/// let creds = Credentials::new("my_api_key", "my_api_secret");
/// assert!(creds.validate().is_ok());
/// assert!(!format!("{creds:?}").contains("my_api_secret"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    /// API key for authentication.
    pub api_key: String,

    api_secret: String,
}

impl Credentials {
    /// Creates new credentials with API key and secret.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Returns the API secret.
    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Checks that neither half of the key pair is blank.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` naming the blank variable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: API_KEY_VAR.to_string(),
            });
        }
        if self.api_secret.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: API_SECRET_VAR.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}

/// USDT-margined futures exchange operations.
///
/// All methods take `&self`; implementations hold no per-call state.
#[async_trait]
pub trait FuturesExchange: Send + Sync {
    /// Returns the exchange name used in log fields.
    fn name(&self) -> &str;

    /// Submits an order with the given parameter set.
    ///
    /// # Errors
    ///
    /// Exchange rejections are returned as [`TradeError::Exchange`];
    /// transport and decoding failures as `Network` or `Data`.
    async fn place_order(&self, params: &OrderParams) -> Result<OrderResponse, TradeError>;

    /// Queries account status.
    async fn futures_account(&self) -> Result<AccountStatus, TradeError>;

    /// Fetches the current mark price of a symbol.
    async fn mark_price(&self, symbol: &Symbol) -> Result<MarkPrice, TradeError>;
}
