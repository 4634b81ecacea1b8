//! Binance USDT-M futures client.
//!
//! Implements [`FuturesExchange`] over the signed REST API.

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use tradebot_core::config::BotConfig;
use tradebot_core::data::{AccountStatus, OrderParams, OrderResponse};
use tradebot_core::error::{DataError, ExchangeError, NetworkError, TradeError};
use tradebot_core::traits::{Credentials, FuturesExchange};
use tradebot_core::types::{MarkPrice, Symbol};

use crate::rest::{RestClient, RestConfig};

use super::types::{
    BinanceApiError, BinanceFuturesAccount, BinanceOrderResponse, BinancePremiumIndex, endpoints,
};

const EXCHANGE: &str = "binance";

/// Binance USDT-M futures client.
///
/// # Example
///
/// ```ignore
/// use tradebot_core::config::BotConfig;
/// use tradebot_core::traits::{Credentials, FuturesExchange};
/// use tradebot_gateway::binance::BinanceFuturesClient;
///
/// let creds = Credentials::new("api_key", "api_secret");
/// let client = BinanceFuturesClient::new(&creds, &BotConfig::default())?;
/// let account = client.futures_account().await?;
/// ```
pub struct BinanceFuturesClient {
    rest: RestClient,
}

impl BinanceFuturesClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns `TradeError::Config` if the credentials are blank or cannot
    /// be sent as a header.
    pub fn new(credentials: &Credentials, config: &BotConfig) -> Result<Self, TradeError> {
        credentials.validate()?;

        let rest_config = RestConfig::builder()
            .base_url(&config.base_url)
            .exchange(EXCHANGE)
            .api_key(&credentials.api_key)
            .api_secret(credentials.api_secret())
            .timeout_ms(config.timeout_ms)
            .recv_window_ms(config.recv_window_ms)
            .build();

        Ok(Self::from_rest_client(RestClient::new(rest_config)?))
    }

    /// Wraps an already configured REST client.
    #[must_use]
    pub fn from_rest_client(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Returns the base URL requests go to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.rest.config().base_url
    }

    /// Maps a non-2xx response to an exchange rejection.
    ///
    /// `{code, msg}` bodies carry the exchange code. Any other body, such as
    /// a gateway HTML page, becomes code 0 with the raw body and status.
    #[must_use]
    pub fn parse_error(status: u16, body: &str) -> TradeError {
        match serde_json::from_str::<BinanceApiError>(body) {
            Ok(error) => ExchangeError::Api {
                code: error.code,
                message: error.msg,
            }
            .into(),
            Err(_) => ExchangeError::Api {
                code: 0,
                message: format!(
                    "Invalid JSON error message from Binance (HTTP {status}): {body}"
                ),
            }
            .into(),
        }
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, TradeError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| NetworkError::Http {
            status_code: status.as_u16(),
            reason: format!("Failed to read response: {e}"),
        })?;

        if !status.is_success() {
            return Err(Self::parse_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| DataError::parse(context, e).into())
    }
}

#[async_trait]
impl FuturesExchange for BinanceFuturesClient {
    fn name(&self) -> &str {
        EXCHANGE
    }

    async fn place_order(&self, params: &OrderParams) -> Result<OrderResponse, TradeError> {
        let response = self
            .rest
            .post(endpoints::ORDER)
            .queries(params.pairs())
            .signed()
            .send()
            .await?;

        let raw: BinanceOrderResponse = Self::read_json(response, "order response").await?;
        let order = OrderResponse::try_from(raw)?;

        info!(
            exchange = EXCHANGE,
            order_id = order.order_id,
            symbol = %order.symbol,
            status = %order.status,
            "Order submitted"
        );
        Ok(order)
    }

    async fn futures_account(&self) -> Result<AccountStatus, TradeError> {
        let response = self.rest.get(endpoints::ACCOUNT).signed().send().await?;
        let raw: BinanceFuturesAccount = Self::read_json(response, "futures account").await?;
        let account = AccountStatus::try_from(raw)?;

        debug!(
            exchange = EXCHANGE,
            can_trade = account.can_trade,
            "Account status received"
        );
        Ok(account)
    }

    async fn mark_price(&self, symbol: &Symbol) -> Result<MarkPrice, TradeError> {
        let response = self
            .rest
            .get(endpoints::PREMIUM_INDEX)
            .query("symbol", symbol.as_str())
            .send()
            .await?;

        let raw: BinancePremiumIndex = Self::read_json(response, "mark price").await?;
        let mark_price = MarkPrice::try_from(raw)?;

        debug!(
            exchange = EXCHANGE,
            symbol = %symbol,
            mark_price = %mark_price,
            "Mark price received"
        );
        Ok(mark_price)
    }
}
