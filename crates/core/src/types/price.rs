//! Type-safe unit price representation using decimal arithmetic.
//!
//! Catalog prices arrive either as JSON numbers or as numeric strings
//! (`1299` and `"1299.00"` both occur). [`Price::coerce`] accepts both and
//! degrades anything else to zero, so a bad catalog record can never make a
//! cart operation fail.
//!
//! Amounts are kept to whole cents and capped at [`MAX_PRICE_UNITS`], which
//! keeps every price exactly representable as a JSON (f64) number.

use core::fmt;
use core::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest accepted unit price, in whole currency units.
pub const MAX_PRICE_UNITS: i64 = 1_000_000_000_000;

/// Decimal places prices are rounded to.
const PRICE_SCALE: u32 = 2;

/// A non-negative unit price in the store currency.
///
/// Serialized as a plain JSON number so persisted carts keep the
/// `{ "price": 299.99 }` shape other readers of the stored cart expect.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use techstore_core::Price;
///
/// assert_eq!(Price::coerce(&json!("299.99")).to_string(), "$299.99");
/// assert_eq!(Price::coerce(&json!(1000)).to_string(), "$1000.00");
/// assert!(Price::coerce(&json!("call for price")).is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, clamping into `0..=MAX_PRICE_UNITS` and rounding to
    /// cents (half away from zero).
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        let clamped = amount.clamp(Decimal::ZERO, Decimal::from(MAX_PRICE_UNITS));
        Self(clamped.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Coerce a JSON number or numeric string into a price.
    ///
    /// Returns [`Price::ZERO`] for anything that is not a number, does not
    /// parse, or is negative.
    #[must_use]
    pub fn coerce(value: &Value) -> Self {
        let amount = match value {
            Value::Number(n) => parse_decimal(&n.to_string())
                .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
            Value::String(s) => parse_decimal(s),
            _ => None,
        };
        amount.map_or(Self::ZERO, Self::new)
    }

    /// Parse a price from a string, with the same fallback rules as
    /// [`Price::coerce`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        parse_decimal(s).map_or(Self::ZERO, Self::new)
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The largest representable price.
    #[must_use]
    pub fn max() -> Self {
        Self(Decimal::from(MAX_PRICE_UNITS))
    }

    /// Returns `true` if the price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the price of `quantity` units, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

/// Parse a trimmed decimal string, accepting scientific notation.
fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Format a decimal amount the way prices are displayed (`$1299.00`).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}
