//! Quantity type for order and execution quantities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Quantity type - used for order quantities and executed quantities.
///
/// Quantities are never negative. A zero quantity is representable
/// (an unfilled order reports `executedQty = 0`), but order requests
/// reject it.
///
/// # Examples
///
/// ```
/// use tradebot_core::types::Quantity;
/// use rust_decimal_macros::dec;
///
/// let qty = Quantity::new(dec!(0.01)).unwrap();
/// assert!(qty.is_positive());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Zero quantity constant.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new non-negative `Quantity`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NegativeQuantity` if the value is negative.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO {
            return Err(ValidationError::NegativeQuantity(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `Decimal` value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true if the quantity is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the quantity is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|_| ValidationError::InvalidDecimal(s.to_string()))?;
        Self::new(decimal)
    }
}

impl From<Quantity> for Decimal {
    fn from(qty: Quantity) -> Self {
        qty.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}
