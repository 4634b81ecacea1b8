//! Operator input validation.
//!
//! Turns raw flag values into domain types. Side and type are matched
//! case-insensitively, so `buy` and `market` are accepted.

use rust_decimal::Decimal;

use tradebot_core::data::{OrderSide, OrderType};
use tradebot_core::error::OrderValidationError;
use tradebot_core::types::{Price, Quantity, Symbol};

/// Parses a trading symbol such as `BTCUSDT`.
pub fn validate_symbol(symbol: &str) -> Result<Symbol, OrderValidationError> {
    Ok(Symbol::new(symbol.trim())?)
}

/// Parses `BUY` or `SELL`.
pub fn validate_side(side: &str) -> Result<OrderSide, OrderValidationError> {
    side.parse()
}

/// Parses `MARKET` or `LIMIT`.
pub fn validate_order_type(order_type: &str) -> Result<OrderType, OrderValidationError> {
    order_type.parse()
}

/// Requires a strictly positive quantity.
pub fn validate_quantity(quantity: Decimal) -> Result<Quantity, OrderValidationError> {
    if quantity <= Decimal::ZERO {
        return Err(OrderValidationError::NonPositiveQuantity { quantity });
    }
    Ok(Quantity::new(quantity)?)
}

/// Requires a price for LIMIT orders and rejects one for MARKET orders.
pub fn validate_price(
    price: Option<Decimal>,
    order_type: OrderType,
) -> Result<Option<Price>, OrderValidationError> {
    match (price, order_type.requires_price()) {
        (Some(value), true) => Ok(Some(Price::new(value)?)),
        (None, true) => Err(OrderValidationError::MissingPrice),
        (Some(_), false) => Err(OrderValidationError::UnexpectedPrice { order_type }),
        (None, false) => Ok(None),
    }
}

/// Parses an optional stop-loss or take-profit trigger.
pub fn validate_trigger(price: Option<Decimal>) -> Result<Option<Price>, OrderValidationError> {
    price.map(Price::new).transpose().map_err(Into::into)
}
