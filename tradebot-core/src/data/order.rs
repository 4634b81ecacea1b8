//! Order types and structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OrderValidationError;
use crate::types::{MarkPrice, Price, Quantity, Symbol};

/// Order side - Buy or Sell direction.
///
/// Parsing is case-insensitive, so operator input such as `buy` is accepted.
///
/// # Examples
///
/// ```
/// use tradebot_core::data::OrderSide;
///
/// let side: OrderSide = "buy".parse().unwrap();
/// assert_eq!(side, OrderSide::Buy);
/// assert_eq!(side.opposite().to_string(), "SELL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order (long position)
    Buy,
    /// Sell order (short position)
    Sell,
}

impl OrderSide {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns the exchange wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = OrderValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err(OrderValidationError::InvalidSide {
                value: s.to_string(),
            }),
        }
    }
}

/// Order type - specifies how the order should be executed.
///
/// Operators submit `MARKET` or `LIMIT`. The two trigger types are only
/// produced for protective orders.
///
/// # Examples
///
/// ```
/// use tradebot_core::data::OrderType;
///
/// let order_type: OrderType = "limit".parse().unwrap();
/// assert!(order_type.requires_price());
/// assert!("STOP_MARKET".parse::<OrderType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order - executes immediately at best available price
    Market,
    /// Limit order - executes at specified price or better
    Limit,
    /// Stop market order - becomes market order when stop price is reached
    StopMarket,
    /// Take profit market order - market order triggered at profit target
    TakeProfitMarket,
}

impl OrderType {
    /// Returns true if this order type requires a price.
    #[must_use]
    pub const fn requires_price(&self) -> bool {
        matches!(self, Self::Limit)
    }

    /// Returns true if operators may submit this type directly.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        matches!(self, Self::Market | Self::Limit)
    }

    /// Returns the exchange wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::StopMarket => "STOP_MARKET",
            Self::TakeProfitMarket => "TAKE_PROFIT_MARKET",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a primary order type. Trigger types are rejected.
impl FromStr for OrderType {
    type Err = OrderValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARKET" => Ok(Self::Market),
            "LIMIT" => Ok(Self::Limit),
            _ => Err(OrderValidationError::InvalidOrderType {
                value: s.to_string(),
            }),
        }
    }
}

/// Order status reported by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order has been accepted by the exchange
    New,
    /// Order has been partially filled
    PartiallyFilled,
    /// Order has been completely filled
    Filled,
    /// Order has been canceled
    Canceled,
    /// Order was rejected by the exchange
    Rejected,
    /// Order has expired
    Expired,
    /// Status not known to this client
    #[serde(other)]
    Unknown,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Time in force - specifies how long an order remains active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Good Till Cancel - remains active until filled or canceled
    #[default]
    Gtc,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gtc => write!(f, "GTC"),
        }
    }
}

/// Primary order request.
///
/// Fields are private so a constructed request is always valid:
/// the quantity is positive and a price is present exactly for LIMIT.
///
/// # Examples
///
/// ```
/// use tradebot_core::data::{OrderRequest, OrderSide, OrderType};
/// use tradebot_core::types::{Price, Quantity, Symbol};
/// use rust_decimal_macros::dec;
///
/// let request = OrderRequest::new(
///     Symbol::new("BTCUSDT").unwrap(),
///     OrderSide::Buy,
///     OrderType::Limit,
///     Quantity::new(dec!(0.01)).unwrap(),
///     Some(Price::new(dec!(50000)).unwrap()),
/// )
/// .unwrap();
/// assert_eq!(request.price().map(|p| p.as_decimal()), Some(dec!(50000)));
///
/// let unpriced = OrderRequest::new(
///     Symbol::new("BTCUSDT").unwrap(),
///     OrderSide::Buy,
///     OrderType::Limit,
///     Quantity::new(dec!(0.01)).unwrap(),
///     None,
/// );
/// assert!(unpriced.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    symbol: Symbol,
    side: OrderSide,
    order_type: OrderType,
    quantity: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Price>,
}

impl OrderRequest {
    /// Creates a validated order request.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not MARKET or LIMIT, the quantity is
    /// zero, or the price presence does not match the type.
    pub fn new(
        symbol: Symbol,
        side: OrderSide,
        order_type: OrderType,
        quantity: Quantity,
        price: Option<Price>,
    ) -> Result<Self, OrderValidationError> {
        let request = Self {
            symbol,
            side,
            order_type,
            quantity,
            price,
        };
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> Result<(), OrderValidationError> {
        if !self.order_type.is_primary() {
            return Err(OrderValidationError::InvalidOrderType {
                value: self.order_type.to_string(),
            });
        }

        if !self.quantity.is_positive() {
            return Err(OrderValidationError::NonPositiveQuantity {
                quantity: self.quantity.as_decimal(),
            });
        }

        match (self.order_type.requires_price(), self.price) {
            (true, None) => Err(OrderValidationError::MissingPrice),
            (false, Some(_)) => Err(OrderValidationError::UnexpectedPrice {
                order_type: self.order_type,
            }),
            _ => Ok(()),
        }
    }

    /// Returns the trading symbol.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Returns the order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Returns the order quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the limit price, present only for LIMIT orders.
    #[must_use]
    pub const fn price(&self) -> Option<Price> {
        self.price
    }
}

/// Kind of protective order attached to an opened position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtectiveKind {
    /// Closes the position if the price moves against it.
    StopLoss,
    /// Closes the position once the profit target is reached.
    TakeProfit,
}

impl ProtectiveKind {
    /// Returns the trigger order type sent to the exchange.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        match self {
            Self::StopLoss => OrderType::StopMarket,
            Self::TakeProfit => OrderType::TakeProfitMarket,
        }
    }
}

impl fmt::Display for ProtectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StopLoss => write!(f, "stop loss"),
            Self::TakeProfit => write!(f, "take profit"),
        }
    }
}

/// Stop-loss or take-profit request for a position opened by a primary order.
///
/// `side` is the side of the primary order. The submitted order goes the
/// other way and only reduces the position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectiveOrderRequest {
    /// Trading symbol
    pub symbol: Symbol,
    /// Side of the position being protected
    pub side: OrderSide,
    /// Quantity to close
    pub quantity: Quantity,
    /// Trigger price
    pub trigger_price: Price,
    /// Stop loss or take profit
    pub kind: ProtectiveKind,
}

impl ProtectiveOrderRequest {
    /// Creates a stop-loss request.
    #[must_use]
    pub fn stop_loss(
        symbol: Symbol,
        side: OrderSide,
        quantity: Quantity,
        stop_price: Price,
    ) -> Self {
        Self {
            symbol,
            side,
            quantity,
            trigger_price: stop_price,
            kind: ProtectiveKind::StopLoss,
        }
    }

    /// Creates a take-profit request.
    #[must_use]
    pub fn take_profit(
        symbol: Symbol,
        side: OrderSide,
        quantity: Quantity,
        target_price: Price,
    ) -> Self {
        Self {
            symbol,
            side,
            quantity,
            trigger_price: target_price,
            kind: ProtectiveKind::TakeProfit,
        }
    }

    /// Creates the protective request matching a primary order.
    #[must_use]
    pub fn for_order(order: &OrderRequest, kind: ProtectiveKind, trigger_price: Price) -> Self {
        Self {
            symbol: order.symbol().clone(),
            side: order.side(),
            quantity: order.quantity(),
            trigger_price,
            kind,
        }
    }

    /// Side of the submitted order.
    #[must_use]
    pub const fn exit_side(&self) -> OrderSide {
        self.side.opposite()
    }

    /// Checks the trigger price against the current mark price.
    ///
    /// Longs stop below and take profit above the mark; shorts the reverse.
    /// Equality is always rejected.
    ///
    /// # Errors
    ///
    /// Returns `StopLossDirection` or `TakeProfitDirection` when the
    /// trigger is on the wrong side of the mark.
    pub fn check_against(&self, mark_price: MarkPrice) -> Result<(), OrderValidationError> {
        let price = self.trigger_price;
        match (self.kind, self.side) {
            (ProtectiveKind::StopLoss, OrderSide::Buy) if !mark_price.is_above(price) => {
                Err(self.direction_error(mark_price))
            }
            (ProtectiveKind::StopLoss, OrderSide::Sell) if !mark_price.is_below(price) => {
                Err(self.direction_error(mark_price))
            }
            (ProtectiveKind::TakeProfit, OrderSide::Buy) if !mark_price.is_below(price) => {
                Err(self.direction_error(mark_price))
            }
            (ProtectiveKind::TakeProfit, OrderSide::Sell) if !mark_price.is_above(price) => {
                Err(self.direction_error(mark_price))
            }
            _ => Ok(()),
        }
    }

    fn direction_error(&self, mark_price: MarkPrice) -> OrderValidationError {
        match self.kind {
            ProtectiveKind::StopLoss => OrderValidationError::StopLossDirection {
                side: self.side,
                stop_price: self.trigger_price,
                mark_price,
            },
            ProtectiveKind::TakeProfit => OrderValidationError::TakeProfitDirection {
                side: self.side,
                target_price: self.trigger_price,
                mark_price,
            },
        }
    }
}

/// Result of an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Exchange-assigned order ID
    pub order_id: i64,
    /// Trading symbol
    pub symbol: Symbol,
    /// Current status
    pub status: OrderStatus,
    /// Quantity filled so far
    pub executed_qty: Quantity,
    /// Average fill price, absent when the exchange did not report one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn symbol() -> Symbol {
        Symbol::new("BTCUSDT").unwrap()
    }

    fn qty(value: Decimal) -> Quantity {
        Quantity::new(value).unwrap()
    }

    fn price(value: Decimal) -> Price {
        Price::new(value).unwrap()
    }

    #[test]
    fn test_side_and_type_parsing_normalizes_case() {
        assert_eq!("buy".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!(" Sell ".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert_eq!("market".parse::<OrderType>().unwrap(), OrderType::Market);
        assert_eq!("LIMIT".parse::<OrderType>().unwrap(), OrderType::Limit);

        assert!(matches!(
            "long".parse::<OrderSide>(),
            Err(OrderValidationError::InvalidSide { .. })
        ));
        assert!(matches!(
            "take_profit_market".parse::<OrderType>(),
            Err(OrderValidationError::InvalidOrderType { .. })
        ));
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(OrderType::StopMarket.to_string(), "STOP_MARKET");
        assert_eq!(OrderType::TakeProfitMarket.to_string(), "TAKE_PROFIT_MARKET");
        assert_eq!(TimeInForce::Gtc.to_string(), "GTC");
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
    }

    #[test]
    fn test_limit_without_price_is_rejected() {
        let result =
            OrderRequest::new(symbol(), OrderSide::Buy, OrderType::Limit, qty(dec!(1)), None);
        assert_eq!(result, Err(OrderValidationError::MissingPrice));
    }

    #[test]
    fn test_market_with_price_is_rejected() {
        let result = OrderRequest::new(
            symbol(),
            OrderSide::Buy,
            OrderType::Market,
            qty(dec!(1)),
            Some(price(dec!(100))),
        );
        assert!(matches!(
            result,
            Err(OrderValidationError::UnexpectedPrice {
                order_type: OrderType::Market
            })
        ));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let result =
            OrderRequest::new(symbol(), OrderSide::Sell, OrderType::Market, Quantity::ZERO, None);
        assert!(matches!(
            result,
            Err(OrderValidationError::NonPositiveQuantity { .. })
        ));
    }

    #[test]
    fn test_trigger_types_are_not_primary() {
        let result = OrderRequest::new(
            symbol(),
            OrderSide::Sell,
            OrderType::StopMarket,
            qty(dec!(1)),
            None,
        );
        assert!(matches!(
            result,
            Err(OrderValidationError::InvalidOrderType { .. })
        ));
    }

    fn stop_loss(side: OrderSide, stop_price: Decimal) -> ProtectiveOrderRequest {
        ProtectiveOrderRequest::stop_loss(symbol(), side, qty(dec!(1)), price(stop_price))
    }

    fn take_profit(side: OrderSide, target_price: Decimal) -> ProtectiveOrderRequest {
        ProtectiveOrderRequest::take_profit(symbol(), side, qty(dec!(1)), price(target_price))
    }

    #[test]
    fn test_stop_loss_direction() {
        let mark = MarkPrice::new(dec!(50000)).unwrap();

        let long_ok = stop_loss(OrderSide::Buy, dec!(49000));
        assert!(long_ok.check_against(mark).is_ok());
        assert_eq!(long_ok.exit_side(), OrderSide::Sell);

        for bad in [dec!(50000), dec!(51000)] {
            assert!(matches!(
                stop_loss(OrderSide::Buy, bad).check_against(mark),
                Err(OrderValidationError::StopLossDirection { .. })
            ));
        }

        assert!(stop_loss(OrderSide::Sell, dec!(51000)).check_against(mark).is_ok());

        for bad in [dec!(50000), dec!(49000)] {
            assert!(matches!(
                stop_loss(OrderSide::Sell, bad).check_against(mark),
                Err(OrderValidationError::StopLossDirection { .. })
            ));
        }
    }

    #[test]
    fn test_take_profit_direction() {
        let mark = MarkPrice::new(dec!(50000)).unwrap();

        assert!(take_profit(OrderSide::Buy, dec!(52000)).check_against(mark).is_ok());
        assert!(matches!(
            take_profit(OrderSide::Buy, dec!(50000)).check_against(mark),
            Err(OrderValidationError::TakeProfitDirection { .. })
        ));

        assert!(take_profit(OrderSide::Sell, dec!(48000)).check_against(mark).is_ok());
        assert!(matches!(
            take_profit(OrderSide::Sell, dec!(50001)).check_against(mark),
            Err(OrderValidationError::TakeProfitDirection { .. })
        ));
    }

    #[test]
    fn test_protective_for_order_copies_position() {
        let order =
            OrderRequest::new(symbol(), OrderSide::Sell, OrderType::Market, qty(dec!(0.5)), None)
                .unwrap();
        let target = price(dec!(40000));
        let tp = ProtectiveOrderRequest::for_order(&order, ProtectiveKind::TakeProfit, target);
        assert_eq!(tp.side, OrderSide::Sell);
        assert_eq!(tp.exit_side(), OrderSide::Buy);
        assert_eq!(tp.quantity, qty(dec!(0.5)));
        assert_eq!(tp.kind.order_type(), OrderType::TakeProfitMarket);
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let status: OrderStatus = serde_json::from_str("\"EXPIRED_IN_MATCH\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
        let status: OrderStatus = serde_json::from_str("\"PARTIALLY_FILLED\"").unwrap();
        assert_eq!(status, OrderStatus::PartiallyFilled);
    }
}
