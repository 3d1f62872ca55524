//! Menu prices using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::item::ValidationError;

/// A unit price in soles.
///
/// Prices arrive as text from page markup (`data-price="25.00"`) and as either
/// strings or numbers from persisted carts. Both paths go through
/// [`Price::parse`], so a price held by the cart is always a finite decimal
/// in `0..=Price::MAX` and arithmetic on it can never yield `NaN` or overflow.
///
/// Serialized as a string to keep the original scale (`"25.0"` stays `"25.0"`).
///
/// ## Examples
///
/// ```
/// use wasi_cart_core::Price;
///
/// assert!(Price::parse("25.00").is_ok());
/// assert!(Price::parse("veinte").is_err());
/// assert!(Price::parse("-3").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price (S/ 1,000,000).
    pub const MAX: Self = Self(Decimal::from_parts(1_000_000, 0, 0, false, 0));

    /// Parse a price from text.
    ///
    /// Surrounding whitespace is ignored. Plain decimals and scientific
    /// notation are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] if the text is not a number,
    /// [`ValidationError::NegativePrice`] if it is below zero and
    /// [`ValidationError::PriceTooHigh`] if it is above [`Price::MAX`].
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| ValidationError::InvalidPrice(s.to_owned()))?;
        Self::from_decimal(amount)
    }

    /// Wrap an already numeric amount.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativePrice`] if `amount` is below zero and
    /// [`ValidationError::PriceTooHigh`] if it is above [`Price::MAX`].
    pub fn from_decimal(amount: Decimal) -> Result<Self, ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(amount.to_string()));
        }
        if amount > Self::MAX.0 {
            return Err(ValidationError::PriceTooHigh(amount.to_string()));
        }
        Ok(Self(amount))
    }

    /// The amount in soles.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    ///
    /// Saturates at `Decimal::MAX`, which a bounded price and quantity never reach.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Wire shapes a stored price may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match RawPrice::deserialize(deserializer)? {
            RawPrice::Text(s) => s,
            RawPrice::Number(n) => n.to_string(),
        };
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
