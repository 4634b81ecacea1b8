//! Price type for limit and trigger prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Price type - used for limit prices and stop/take-profit trigger prices.
///
/// Prices sent to the exchange are always strictly positive.
///
/// # Examples
///
/// ```
/// use tradebot_core::types::Price;
/// use rust_decimal_macros::dec;
///
/// let price = Price::new(dec!(42000.50)).unwrap();
/// assert_eq!(price.as_decimal(), dec!(42000.50));
/// assert!(Price::new(dec!(0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new `Price` from a `Decimal` value.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonPositivePrice` if the value is zero or negative.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `Decimal` value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|_| ValidationError::InvalidDecimal(s.to_string()))?;
        Self::new(decimal)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_new_valid() {
        let price = Price::new(dec!(100.50)).unwrap();
        assert_eq!(price.as_decimal(), dec!(100.50));
    }

    #[test]
    fn test_price_rejects_zero_and_negative() {
        assert!(matches!(
            Price::new(dec!(0)),
            Err(ValidationError::NonPositivePrice(_))
        ));
        assert!(matches!(
            Price::new(dec!(-1.0)),
            Err(ValidationError::NonPositivePrice(_))
        ));
    }

    #[test]
    fn test_price_display_trims_trailing_zeros() {
        let price = Price::new(dec!(42000.500)).unwrap();
        assert_eq!(format!("{price}"), "42000.5");
    }

    #[test]
    fn test_price_from_str() {
        let price: Price = "100.50".parse().unwrap();
        assert_eq!(price.as_decimal(), dec!(100.50));

        let err = "abc".parse::<Price>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDecimal(_)));
    }
}
