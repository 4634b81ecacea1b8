//! Authenticated exchange session.
//!
//! [`ExchangeSession`] is what the binary holds for the lifetime of one
//! invocation: it owns the exchange client and exposes order submission
//! and a connectivity check.

use async_trait::async_trait;
use tracing::{info, warn};

use tradebot_core::config::BotConfig;
use tradebot_core::data::{AccountStatus, OrderParams, OrderResponse};
use tradebot_core::error::TradeError;
use tradebot_core::traits::{Credentials, FuturesExchange};
use tradebot_core::types::{MarkPrice, Symbol};

use crate::binance::BinanceFuturesClient;

/// Exchange session wrapping a [`FuturesExchange`] implementation.
pub struct ExchangeSession<E = BinanceFuturesClient> {
    exchange: E,
}

impl ExchangeSession<BinanceFuturesClient> {
    /// Authenticates against the configured futures endpoint.
    ///
    /// No request is sent here; blank credentials fail immediately with
    /// `ConfigError::MissingEnvVar`.
    pub fn connect(credentials: &Credentials, config: &BotConfig) -> Result<Self, TradeError> {
        let exchange = BinanceFuturesClient::new(credentials, config)?;
        info!(base_url = %config.base_url, "Exchange session created");
        Ok(Self { exchange })
    }
}

impl<E: FuturesExchange> ExchangeSession<E> {
    /// Wraps an existing exchange implementation.
    #[must_use]
    pub fn from_exchange(exchange: E) -> Self {
        Self { exchange }
    }

    /// Returns the underlying exchange.
    #[must_use]
    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    /// Forwards the parameter set to the order-creation endpoint.
    ///
    /// API errors are returned unmodified.
    pub async fn place_order(&self, params: &OrderParams) -> Result<OrderResponse, TradeError> {
        self.exchange.place_order(params).await
    }

    /// Fetches the current mark price for `symbol`.
    pub async fn mark_price(&self, symbol: &Symbol) -> Result<MarkPrice, TradeError> {
        self.exchange.mark_price(symbol).await
    }

    /// Probes the account endpoint. Never fails: any error yields `false`.
    pub async fn validate_connection(&self) -> bool {
        match self.exchange.futures_account().await {
            Ok(account) => {
                info!(
                    exchange = self.exchange.name(),
                    can_trade = account.can_trade,
                    "Connection validated"
                );
                true
            }
            Err(e) => {
                warn!(
                    exchange = self.exchange.name(),
                    category = e.category(),
                    error = %e,
                    "Connection validation failed"
                );
                false
            }
        }
    }
}

#[async_trait]
impl<E: FuturesExchange> FuturesExchange for ExchangeSession<E> {
    fn name(&self) -> &str {
        self.exchange.name()
    }

    async fn place_order(&self, params: &OrderParams) -> Result<OrderResponse, TradeError> {
        ExchangeSession::place_order(self, params).await
    }

    async fn futures_account(&self) -> Result<AccountStatus, TradeError> {
        self.exchange.futures_account().await
    }

    async fn mark_price(&self, symbol: &Symbol) -> Result<MarkPrice, TradeError> {
        ExchangeSession::mark_price(self, symbol).await
    }
}
