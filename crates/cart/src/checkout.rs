//! Order confirmation.
//!
//! Reaching the order-confirmation step snapshots the cart and then empties
//! it. The cart is cleared whether or not the order was accepted upstream:
//! the confirmation page is the end of the shopping session either way.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::item::CartLineItem;
use crate::state::CartState;

/// Prefix for order references shown on the confirmation page.
const REFERENCE_PREFIX: &str = "ORD-";

/// What was in the cart when the order was confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Human-readable order reference (`ORD-1A2B3C4D`).
    pub reference: String,
    pub items: Vec<CartLineItem>,
    pub total_quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl OrderConfirmation {
    /// Snapshot a cart under a freshly generated reference.
    #[must_use]
    pub fn from_state(state: &CartState) -> Self {
        Self {
            reference: generate_reference(),
            items: state.items().to_vec(),
            total_quantity: state.total_quantity(),
            total_amount: state.total_amount(),
        }
    }

    /// Whether the confirmed cart was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn generate_reference() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    let short: String = id.chars().take(8).collect();
    format!("{REFERENCE_PREFIX}{short}")
}

#[cfg(test)]
mod tests {
    use techstore_core::ProductDescriptor;

    use super::*;
    use crate::state::CartAction;

    #[test]
    fn test_reference_format() {
        let reference = generate_reference();
        assert!(reference.starts_with("ORD-"));
        assert_eq!(reference.len(), 12);
        assert!(reference[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_from_state_snapshots_items() {
        let mut state = CartState::new();
        state.apply(CartAction::Add(CartLineItem::from_descriptor(
            &ProductDescriptor::new("A", "Laptop", 900),
        )));

        let confirmation = OrderConfirmation::from_state(&state);
        assert!(!confirmation.is_empty());
        assert_eq!(confirmation.items, state.items());
        assert_eq!(confirmation.total_quantity, 1);
        assert_eq!(confirmation.total_amount, state.total_amount());
    }
}
