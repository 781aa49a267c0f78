//! Non-negative decimal price, persisted in minor currency units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when converting a [`Price`] for storage.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The amount does not fit in 64-bit minor units.
    #[error("price out of range: {0}")]
    OutOfRange(Decimal),
}

/// A product price in major currency units (e.g. rubles, not kopecks).
///
/// Serialized as a plain JSON number. Storage keeps an integer count of
/// hundredths; see [`Price::to_minor_units`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Minor units per major unit.
    pub const MINOR_UNITS: i64 = 100;

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Rebuild a price from stored minor units.
    #[must_use]
    pub fn from_minor_units(units: i64) -> Self {
        Self(Decimal::new(units, 2))
    }

    /// Convert to minor units, rounding half away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for negative amounts and
    /// [`PriceError::OutOfRange`] if the result overflows `i64`.
    pub fn to_minor_units(&self) -> Result<i64, PriceError> {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            return Err(PriceError::Negative(self.0));
        }
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|v| v.to_i64())
            .ok_or(PriceError::OutOfRange(self.0))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_minor_units() {
        let price = Price::new(Decimal::from_str("299.95").unwrap());
        assert_eq!(price.to_minor_units().unwrap(), 29995);
        assert_eq!(Price::from_minor_units(29995), price);
    }

    #[test]
    fn test_minor_units_rounds() {
        let price = Price::new(Decimal::from_str("0.125").unwrap());
        assert_eq!(price.to_minor_units().unwrap(), 13);
    }

    #[test]
    fn test_zero_allowed() {
        assert_eq!(Price::default().to_minor_units().unwrap(), 0);
    }

    #[test]
    fn test_negative_rejected() {
        let price = Price::new(Decimal::from_str("-1.00").unwrap());
        assert!(matches!(price.to_minor_units(), Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            Price::new(Decimal::MAX).to_minor_units(),
            Err(PriceError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_json_number() {
        let price: Price = serde_json::from_str("299.95").unwrap();
        assert_eq!(price.to_minor_units().unwrap(), 29995);
        assert_eq!(serde_json::to_string(&Price::from_minor_units(150)).unwrap(), "1.5");
    }
}
