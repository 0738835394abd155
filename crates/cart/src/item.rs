//! Cart line items.

use serde::{Deserialize, Serialize};

use techstore_core::{Price, ProductDescriptor, ProductId};

/// Name used when a product arrives without one.
pub const PLACEHOLDER_NAME: &str = "Unnamed product";

/// Image used when a product arrives without one.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

/// A single cart entry: one product and how many units of it.
///
/// `quantity` is at least 1 for as long as the line exists; lines that would
/// drop to zero are removed by the reducer instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl CartLineItem {
    /// Normalize a catalog descriptor into a fresh line item with quantity 1.
    ///
    /// Missing ids are replaced by a generated one; missing or blank text
    /// fields fall back to placeholders; prices are coerced with
    /// [`Price::coerce`].
    #[must_use]
    pub fn from_descriptor(product: &ProductDescriptor) -> Self {
        Self {
            id: product.product_id().unwrap_or_else(ProductId::generate),
            name: non_blank(product.name.as_deref()).unwrap_or(PLACEHOLDER_NAME).to_owned(),
            price: product.unit_price(),
            image: non_blank(product.image.as_deref())
                .unwrap_or(PLACEHOLDER_IMAGE)
                .to_owned(),
            description: product.description.clone().unwrap_or_default(),
            quantity: 1,
            stock: product.stock_level(),
        }
    }

    /// This line's contribution to the cart total (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> rust_decimal::Decimal {
        self.price.times(self.quantity)
    }

    /// Whether another unit can be added without exceeding known stock.
    #[must_use]
    pub fn can_increment(&self) -> bool {
        self.stock.is_none_or(|stock| self.quantity < stock)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_descriptor_applies_defaults() {
        let product: ProductDescriptor = serde_json::from_value(json!({ "id": "A" })).unwrap();
        let item = CartLineItem::from_descriptor(&product);

        assert_eq!(item.id, ProductId::new("A"));
        assert_eq!(item.name, PLACEHOLDER_NAME);
        assert_eq!(item.image, PLACEHOLDER_IMAGE);
        assert_eq!(item.description, "");
        assert_eq!(item.price, Price::ZERO);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.stock, None);
    }

    #[test]
    fn test_from_descriptor_blank_name_uses_placeholder() {
        let product = ProductDescriptor::new("A", "   ", 10).with_image("");
        let item = CartLineItem::from_descriptor(&product);
        assert_eq!(item.name, PLACEHOLDER_NAME);
        assert_eq!(item.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_from_descriptor_without_id_generates_one() {
        let product: ProductDescriptor =
            serde_json::from_value(json!({ "name": "Mystery box", "price": 5 })).unwrap();
        let item = CartLineItem::from_descriptor(&product);
        assert!(item.id.is_generated());
    }

    #[test]
    fn test_line_total() {
        let mut item = CartLineItem::from_descriptor(&ProductDescriptor::new("A", "A", "299.99"));
        item.quantity = 2;
        assert_eq!(item.line_total(), Price::parse("599.98").amount());
    }

    #[test]
    fn test_can_increment_respects_stock() {
        let mut item =
            CartLineItem::from_descriptor(&ProductDescriptor::new("A", "A", 1).with_stock(2));
        assert!(item.can_increment());
        item.quantity = 2;
        assert!(!item.can_increment());

        item.stock = None;
        assert!(item.can_increment());
    }

    #[test]
    fn test_serialized_shape() {
        let item = CartLineItem::from_descriptor(
            &ProductDescriptor::new("A", "Laptop", "1000").with_image("/a.png"),
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            json!({
                "id": "A",
                "name": "Laptop",
                "price": 1000.0,
                "image": "/a.png",
                "description": "",
                "quantity": 1
            })
        );
    }
}
