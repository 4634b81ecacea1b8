//! Order validation error types.
//!
//! Every variant here is raised before a request leaves the process.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{OrderSide, OrderType};
use crate::types::{MarkPrice, Price, ValidationError};

/// Order validation error type.
///
/// # Examples
///
/// ```
/// use tradebot_core::error::OrderValidationError;
///
/// let error = OrderValidationError::InvalidSide { value: "HOLD".to_string() };
/// assert!(error.to_string().contains("HOLD"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderValidationError {
    /// Side is neither BUY nor SELL.
    #[error("[Validation] Invalid side '{value}': must be BUY or SELL")]
    InvalidSide {
        /// Value as supplied by the operator.
        value: String,
    },

    /// Order type is not accepted for this request.
    #[error("[Validation] Invalid order type '{value}': must be MARKET or LIMIT")]
    InvalidOrderType {
        /// Value as supplied by the operator.
        value: String,
    },

    /// Quantity is zero.
    #[error("[Validation] Quantity must be greater than 0, got {quantity}")]
    NonPositiveQuantity {
        /// Rejected quantity.
        quantity: Decimal,
    },

    /// LIMIT order submitted without a price.
    #[error("[Validation] Price is required for LIMIT orders")]
    MissingPrice,

    /// Price supplied for an order type that does not take one.
    #[error("[Validation] Price is only allowed for LIMIT orders, got {order_type}")]
    UnexpectedPrice {
        /// Order type of the request.
        order_type: OrderType,
    },

    /// Stop-loss trigger is on the wrong side of the mark price.
    #[error("{}", stop_loss_message(*side))]
    StopLossDirection {
        /// Side of the position being protected.
        side: OrderSide,
        /// Requested stop price.
        stop_price: Price,
        /// Mark price at validation time.
        mark_price: MarkPrice,
    },

    /// Take-profit trigger is on the wrong side of the mark price.
    #[error("{}", take_profit_message(*side))]
    TakeProfitDirection {
        /// Side of the position being protected.
        side: OrderSide,
        /// Requested target price.
        target_price: Price,
        /// Mark price at validation time.
        mark_price: MarkPrice,
    },

    /// A primitive value failed construction.
    #[error("[Validation] {0}")]
    InvalidValue(#[from] ValidationError),
}

fn stop_loss_message(side: OrderSide) -> &'static str {
    match side {
        OrderSide::Buy => "[Validation] Stop loss must be BELOW current price for LONG.",
        OrderSide::Sell => "[Validation] Stop loss must be ABOVE current price for SHORT.",
    }
}

fn take_profit_message(side: OrderSide) -> &'static str {
    match side {
        OrderSide::Buy => "[Validation] Take profit must be ABOVE current price for LONG.",
        OrderSide::Sell => "[Validation] Take profit must be BELOW current price for SHORT.",
    }
}
