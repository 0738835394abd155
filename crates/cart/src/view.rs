//! Read-only projections of the cart for display.
//!
//! The cart badge only needs [`CartSummary`]; the cart panel and checkout
//! summary render a [`CartView`] with prices already formatted.

use rust_decimal::Decimal;
use serde::Serialize;

use techstore_core::format_amount;

use crate::item::CartLineItem;
use crate::state::CartState;

/// Aggregate numbers for badges and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub total_quantity: u64,
    pub distinct_items: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl From<&CartState> for CartSummary {
    fn from(state: &CartState) -> Self {
        Self {
            total_quantity: state.total_quantity(),
            distinct_items: state.items().len(),
            total_amount: state.total_amount(),
        }
    }
}

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// `false` once the line has reached known stock.
    pub can_increment: bool,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_amount(Decimal::ZERO),
            item_count: 0,
        }
    }
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_price: format_amount(item.line_total()),
            can_increment: item.can_increment(),
        }
    }
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        Self {
            items: state.items().iter().map(CartItemView::from).collect(),
            subtotal: format_amount(state.total_amount()),
            item_count: state.total_quantity(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use techstore_core::ProductDescriptor;

    use super::*;
    use crate::state::CartAction;

    fn sample_state() -> CartState {
        let mut state = CartState::new();
        let laptop = CartLineItem::from_descriptor(
            &ProductDescriptor::new("A", "Laptop", "1299.5").with_stock(2),
        );
        state.apply(CartAction::Add(laptop.clone()));
        state.apply(CartAction::Add(laptop));
        state.apply(CartAction::Add(CartLineItem::from_descriptor(
            &ProductDescriptor::new("B", "Mouse", 25),
        )));
        state
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.item_count, 0);
        assert_eq!(CartView::from(&CartState::new()), view);
    }

    #[test]
    fn test_view_formats_prices() {
        let view = CartView::from(&sample_state());
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$2624.00");

        let laptop = &view.items[0];
        assert_eq!(laptop.price, "$1299.50");
        assert_eq!(laptop.line_price, "$2599.00");
        assert!(!laptop.can_increment);

        let mouse = &view.items[1];
        assert_eq!(mouse.quantity, 1);
        assert!(mouse.can_increment);
    }

    #[test]
    fn test_summary() {
        let summary = CartSummary::from(&sample_state());
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.distinct_items, 2);
        assert_eq!(summary.total_amount, "2624".parse::<Decimal>().unwrap());
    }
}
