//! NewType wrappers for financial primitives.
//!
//! This module provides type-safe wrappers around decimal values
//! to prevent mixing incompatible types at compile time.
//!
//! # Types
//!
//! - [`Price`] - Limit and trigger prices
//! - [`MarkPrice`] - Exchange mark price used to validate protective orders
//! - [`Quantity`] - Order and execution quantities
//! - [`Symbol`] - Futures contract identifiers

mod mark_price;
mod price;
mod quantity;
mod symbol;

pub use mark_price::MarkPrice;
pub use price::Price;
pub use quantity::Quantity;
pub use symbol::Symbol;

/// Validation error for `NewType` construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ValidationError {
    /// Price value is zero or negative
    #[error("price must be positive: {0}")]
    NonPositivePrice(rust_decimal::Decimal),

    /// Quantity value is negative
    #[error("quantity cannot be negative: {0}")]
    NegativeQuantity(rust_decimal::Decimal),

    /// Mark price is zero or negative
    #[error("mark price must be positive: {0}")]
    NonPositiveMarkPrice(rust_decimal::Decimal),

    /// Text could not be parsed as a decimal number
    #[error("invalid decimal value: {0}")]
    InvalidDecimal(String),

    /// Symbol format is invalid
    #[error("invalid symbol format: {0}")]
    InvalidSymbol(String),

    /// Symbol is empty
    #[error("symbol cannot be empty")]
    EmptySymbol,
}
