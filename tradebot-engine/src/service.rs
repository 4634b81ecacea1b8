//! Order service.
//!
//! Builds exchange parameter sets from validated requests, retries
//! transient submission failures of primary orders, checks protective
//! trigger prices against the mark price and logs classified API errors.

use tracing::{error, info};

use tradebot_core::data::{
    OrderParams, OrderRequest, OrderResponse, OrderSide, OrderType, ProtectiveOrderRequest,
};
use tradebot_core::error::{ExchangeError, TradeError};
use tradebot_core::traits::FuturesExchange;
use tradebot_core::types::{MarkPrice, Price, Quantity, Symbol};

use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};

/// Places orders through a [`FuturesExchange`].
///
/// # Example
///
/// ```ignore
/// use tradebot_engine::OrderService;
///
/// let service = OrderService::new(session);
/// let response = service
///     .create_order(symbol, OrderSide::Buy, OrderType::Market, quantity, None)
///     .await?;
/// ```
pub struct OrderService<E, S = TokioSleeper> {
    exchange: E,
    sleeper: S,
    retry_policy: RetryPolicy,
}

impl<E: FuturesExchange> OrderService<E, TokioSleeper> {
    /// Creates a service with the default retry policy and tokio timer.
    #[must_use]
    pub fn new(exchange: E) -> Self {
        Self::with_sleeper(exchange, TokioSleeper)
    }
}

impl<E: FuturesExchange, S: Sleeper> OrderService<E, S> {
    /// Creates a service with a custom backoff sleeper.
    #[must_use]
    pub fn with_sleeper(exchange: E, sleeper: S) -> Self {
        Self {
            exchange,
            sleeper,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Returns the exchange.
    #[must_use]
    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    /// Returns the retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Validates and submits a MARKET or LIMIT order.
    ///
    /// A LIMIT order without a price, or a MARKET order with one, fails
    /// before anything is sent.
    pub async fn create_order(
        &self,
        symbol: Symbol,
        side: OrderSide,
        order_type: OrderType,
        quantity: Quantity,
        price: Option<Price>,
    ) -> Result<OrderResponse, TradeError> {
        let request = OrderRequest::new(symbol, side, order_type, quantity, price)?;
        self.submit_order(&request).await
    }

    /// Submits a validated primary order.
    ///
    /// Network and decoding failures are retried per the retry policy.
    /// Exchange rejections are logged with their classification and
    /// returned on the first occurrence.
    pub async fn submit_order(&self, request: &OrderRequest) -> Result<OrderResponse, TradeError> {
        let params = OrderParams::for_order(request);
        info!(
            symbol = %request.symbol(),
            order_type = %request.order_type(),
            "Placing order: {} {} {}",
            request.side(),
            request.quantity(),
            request.symbol()
        );

        let result = self
            .retry_policy
            .run(
                || self.exchange.place_order(&params),
                TradeError::is_retryable,
                &self.sleeper,
            )
            .await;

        match result {
            Ok(response) => {
                info!(
                    order_id = response.order_id,
                    status = %response.status,
                    "Order placed"
                );
                Ok(response)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Places a reduce-only STOP_MARKET order on the opposite side.
    ///
    /// Longs must stop strictly below the mark price, shorts strictly above.
    pub async fn place_stop_loss(
        &self,
        symbol: Symbol,
        side: OrderSide,
        quantity: Quantity,
        stop_price: Price,
    ) -> Result<OrderResponse, TradeError> {
        let request = ProtectiveOrderRequest::stop_loss(symbol, side, quantity, stop_price);
        self.place_protective(&request).await
    }

    /// Places a reduce-only TAKE_PROFIT_MARKET order on the opposite side.
    ///
    /// Longs must target strictly above the mark price, shorts strictly below.
    pub async fn place_take_profit(
        &self,
        symbol: Symbol,
        side: OrderSide,
        quantity: Quantity,
        target_price: Price,
    ) -> Result<OrderResponse, TradeError> {
        let request = ProtectiveOrderRequest::take_profit(symbol, side, quantity, target_price);
        self.place_protective(&request).await
    }

    /// Checks a protective request against the mark price and submits it once.
    pub async fn place_protective(
        &self,
        request: &ProtectiveOrderRequest,
    ) -> Result<OrderResponse, TradeError> {
        let mark_price = self.get_mark_price(&request.symbol).await?;

        if let Err(e) = request.check_against(mark_price) {
            error!(
                symbol = %request.symbol,
                kind = %request.kind,
                trigger_price = %request.trigger_price,
                mark_price = %mark_price,
                "{e}"
            );
            return Err(e.into());
        }

        let params = OrderParams::for_protective(request);
        info!(
            symbol = %request.symbol,
            side = %request.exit_side(),
            trigger_price = %request.trigger_price,
            "Placing {} order",
            request.kind
        );

        match self.exchange.place_order(&params).await {
            Ok(response) => {
                info!(
                    order_id = response.order_id,
                    status = %response.status,
                    "{} order placed",
                    request.kind
                );
                Ok(response)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Fetches the current mark price. Failures propagate unchanged.
    pub async fn get_mark_price(&self, symbol: &Symbol) -> Result<MarkPrice, TradeError> {
        self.exchange.mark_price(symbol).await
    }

    /// Logs the classification of an exchange rejection and returns it.
    pub fn handle_api_error(&self, err: &ExchangeError) -> String {
        let message = err.classify();
        error!(
            exchange = self.exchange.name(),
            code = err.code(),
            severity = %err.severity(),
            "{message}"
        );
        message
    }

    fn report(&self, e: TradeError) -> TradeError {
        match &e {
            TradeError::Exchange(api) => {
                self.handle_api_error(api);
            }
            TradeError::RetriesExhausted { attempts } => {
                error!(attempts, "Order submission failed: {e}");
            }
            _ => {
                error!(category = e.category(), "Order submission failed: {e}");
            }
        }
        e
    }
}
