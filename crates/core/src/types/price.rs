//! Decimal price representation.
//!
//! Prices use [`rust_decimal::Decimal`] so cart totals come out exact to
//! the cent. Display follows the Brazilian convention used by the shop
//! ("12,34"); the currency prefix ("R$") belongs to the rendering layer.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the shop currency (BRL), in standard units (reais).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer amount of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Apply an integer percentage discount (0-100).
    ///
    /// A discount of 0 returns the price unchanged; 100 returns zero.
    /// This mirrors the storefront card, which snapshots the discounted
    /// unit price into the cart at add time.
    #[must_use]
    pub fn with_discount(&self, percent: u8) -> Self {
        let factor = Decimal::ONE - Decimal::from(percent) / Decimal::ONE_HUNDRED;
        Self(self.0 * factor)
    }

    /// Format with two decimal places and a comma separator ("12,34").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.2}", self.0).replace('.', ",")
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_comma() {
        assert_eq!(Price::from_cents(1234).display(), "12,34");
        assert_eq!(Price::from_cents(500).display(), "5,00");
        assert_eq!(Price::ZERO.display(), "0,00");
    }

    #[test]
    fn test_with_discount() {
        let price = Price::from_cents(1000);
        assert_eq!(price.with_discount(0), price);
        assert_eq!(price.with_discount(50), Price::from_cents(500));
        assert_eq!(price.with_discount(100), Price::new(Decimal::ZERO));
    }

    #[test]
    fn test_multiply_by_quantity_is_exact() {
        // 0.1 * 3 must be exactly 0.3, not a float approximation
        let price = Price::from_cents(10);
        assert_eq!(price * 3, Price::from_cents(30));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(150), Price::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(400));
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_cents(1999);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"19.99\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
