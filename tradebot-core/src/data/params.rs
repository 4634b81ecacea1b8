//! Exchange order parameter sets.

use std::fmt;

use super::order::{OrderRequest, OrderType, ProtectiveOrderRequest, TimeInForce};

/// Ordered parameter set for the order-creation endpoint.
///
/// Keys keep insertion order so the signed query string is reproducible.
///
/// # Examples
///
/// ```
/// use tradebot_core::data::{OrderParams, OrderRequest, OrderSide, OrderType};
/// use tradebot_core::types::{Quantity, Symbol};
/// use rust_decimal_macros::dec;
///
/// let request = OrderRequest::new(
///     Symbol::new("BTCUSDT").unwrap(),
///     OrderSide::Buy,
///     OrderType::Market,
///     Quantity::new(dec!(0.01)).unwrap(),
///     None,
/// )
/// .unwrap();
/// let params = OrderParams::for_order(&request);
/// assert_eq!(
///     params.to_query(),
///     "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.01&newOrderRespType=RESULT"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderParams {
    pairs: Vec<(&'static str, String)>,
}

impl OrderParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the parameters of a primary order.
    ///
    /// LIMIT orders carry `price` and `timeInForce=GTC`.
    #[must_use]
    pub fn for_order(request: &OrderRequest) -> Self {
        let mut params = Self::new()
            .with("symbol", request.symbol())
            .with("side", request.side())
            .with("type", request.order_type())
            .with("quantity", request.quantity())
            .with("newOrderRespType", "RESULT");

        if request.order_type() == OrderType::Limit {
            if let Some(price) = request.price() {
                params = params
                    .with("price", price)
                    .with("timeInForce", TimeInForce::Gtc);
            }
        }
        params
    }

    /// Builds the parameters of a reduce-only trigger order.
    #[must_use]
    pub fn for_protective(request: &ProtectiveOrderRequest) -> Self {
        Self::new()
            .with("symbol", &request.symbol)
            .with("side", request.exit_side())
            .with("type", request.kind.order_type())
            .with("stopPrice", request.trigger_price)
            .with("quantity", request.quantity)
            .with("reduceOnly", "true")
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the parameter is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns parameter names in order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    /// Returns the key/value pairs in order.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders `key=value` pairs joined with `&`.
    ///
    /// Values are decimal numbers or upper-case identifiers, so no
    /// percent-encoding is needed.
    #[must_use]
    pub fn to_query(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for OrderParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{OrderSide, ProtectiveKind};
    use crate::types::{Price, Quantity, Symbol};
    use rust_decimal_macros::dec;

    fn request(order_type: OrderType, price: Option<Price>) -> OrderRequest {
        OrderRequest::new(
            Symbol::new("BTCUSDT").unwrap(),
            OrderSide::Buy,
            order_type,
            Quantity::new(dec!(0.01)).unwrap(),
            price,
        )
        .unwrap()
    }

    #[test]
    fn test_market_params() {
        let params = OrderParams::for_order(&request(OrderType::Market, None));
        let keys: Vec<_> = params.keys().collect();
        assert_eq!(keys, ["symbol", "side", "type", "quantity", "newOrderRespType"]);
        assert_eq!(params.get("side"), Some("BUY"));
        assert_eq!(params.get("type"), Some("MARKET"));
        assert_eq!(params.get("quantity"), Some("0.01"));
        assert!(!params.contains("price"));
        assert!(!params.contains("timeInForce"));
    }

    #[test]
    fn test_limit_params() {
        let price = Price::new(dec!(42000.50)).unwrap();
        let params = OrderParams::for_order(&request(OrderType::Limit, Some(price)));
        assert_eq!(params.get("price"), Some("42000.5"));
        assert_eq!(params.get("timeInForce"), Some("GTC"));
        assert_eq!(params.get("newOrderRespType"), Some("RESULT"));
        assert_eq!(params.len(), 7);
    }

    #[test]
    fn test_protective_params() {
        let order = request(OrderType::Market, None);
        let sl = ProtectiveOrderRequest::for_order(
            &order,
            ProtectiveKind::StopLoss,
            Price::new(dec!(49000)).unwrap(),
        );
        let params = OrderParams::for_protective(&sl);
        assert_eq!(
            params.to_query(),
            "symbol=BTCUSDT&side=SELL&type=STOP_MARKET&stopPrice=49000&quantity=0.01&reduceOnly=true"
        );
        assert!(!params.contains("newOrderRespType"));
    }

    #[test]
    fn test_empty() {
        let params = OrderParams::new();
        assert!(params.is_empty());
        assert_eq!(params.to_query(), "");
    }
}
