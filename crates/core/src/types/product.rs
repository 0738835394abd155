//! Inbound product descriptors.
//!
//! This is the shape the product catalog hands to the cart when a shopper
//! clicks "add to cart". Every field is optional and loosely typed because the
//! catalog API is: the cart normalizes it once, at the boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::ProductId;
use super::price::Price;

/// A product as received from the catalog.
///
/// ## Accepted shapes
///
/// - `id` and/or `_id`, as a string or a number
/// - `price` as a number or numeric string
/// - `stock` as a number or numeric string
///
/// # Examples
///
/// ```
/// use techstore_core::ProductDescriptor;
///
/// let product: ProductDescriptor = serde_json::from_str(
///     r#"{ "_id": "64f1", "name": "ThinkPad X1", "price": "1499.00", "stock": 3 }"#,
/// )
/// .unwrap();
///
/// assert_eq!(product.product_id().unwrap().as_str(), "64f1");
/// assert_eq!(product.unit_price().to_string(), "$1499.00");
/// assert_eq!(product.stock_level(), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    /// Primary identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Legacy document identifier used by some catalog records.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<Value>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit price, number or numeric string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    /// Display image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Available inventory, number or numeric string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<Value>,
}

impl ProductDescriptor {
    /// Create a descriptor with an id, a name and a price.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: impl Into<Value>) -> Self {
        Self {
            id: Some(Value::String(id.into())),
            name: Some(name.into()),
            price: Some(price.into()),
            ..Self::default()
        }
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the stock level.
    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(Value::from(stock));
        self
    }

    /// The normalized id, if the descriptor carries a usable one.
    #[must_use]
    pub fn product_id(&self) -> Option<ProductId> {
        ProductId::normalize(self.id.as_ref(), self.legacy_id.as_ref())
    }

    /// The coerced unit price ([`Price::ZERO`] when missing or invalid).
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.price.as_ref().map_or(Price::ZERO, Price::coerce)
    }

    /// The coerced stock level, if known.
    #[must_use]
    pub fn stock_level(&self) -> Option<u32> {
        self.stock.as_ref().and_then(coerce_stock)
    }
}

/// Coerce a JSON stock value into a non-negative count.
///
/// Negative numbers clamp to zero; fractional numbers are truncated;
/// anything unparseable means "unknown".
#[must_use]
pub fn coerce_stock(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
            .or_else(|| n.as_i64().map(|_| 0))
            .or_else(|| n.as_f64().map(float_to_stock)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
                .or_else(|| trimmed.parse::<f64>().ok().map(float_to_stock))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped into u32 range first
fn float_to_stock(v: f64) -> u32 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, f64::from(u32::MAX)).trunc() as u32
}
