//! Mark price type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::{Price, ValidationError};

/// Mark price type - the exchange-computed reference price that triggers
/// stop and take-profit orders.
///
/// Mark price is distinct from the last traded price. It compares directly
/// against [`Price`] so protective order checks read naturally.
///
/// # Examples
///
/// ```
/// use tradebot_core::types::{MarkPrice, Price};
/// use rust_decimal_macros::dec;
///
/// let mark = MarkPrice::new(dec!(50000)).unwrap();
/// let stop = Price::new(dec!(49000)).unwrap();
/// assert!(mark.is_above(stop));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct MarkPrice(Decimal);

impl MarkPrice {
    /// Creates a new `MarkPrice` from a `Decimal` value.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonPositiveMarkPrice` if the value is zero or negative.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveMarkPrice(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `Decimal` value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Compares this mark price with an order price.
    #[must_use]
    pub fn cmp_price(&self, price: Price) -> Ordering {
        self.0.cmp(&price.as_decimal())
    }

    /// Returns true if the mark price is strictly above `price`.
    #[must_use]
    pub fn is_above(&self, price: Price) -> bool {
        self.cmp_price(price) == Ordering::Greater
    }

    /// Returns true if the mark price is strictly below `price`.
    #[must_use]
    pub fn is_below(&self, price: Price) -> bool {
        self.cmp_price(price) == Ordering::Less
    }
}

impl fmt::Display for MarkPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for MarkPrice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|_| ValidationError::InvalidDecimal(s.to_string()))?;
        Self::new(decimal)
    }
}

impl From<MarkPrice> for Decimal {
    fn from(mark_price: MarkPrice) -> Self {
        mark_price.0
    }
}
