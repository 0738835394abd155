//! Cart mutation commands.

use serde_json::Value;
use tracing::info;

use techstore_cart::{CartStore, OrderConfirmation};
use techstore_core::{ProductDescriptor, ProductId};

/// Build a product descriptor from command-line flags.
///
/// The price is passed through as a string so it goes through the same
/// coercion as catalog data.
pub fn descriptor_from_args(
    id: Option<String>,
    name: Option<String>,
    price: Option<String>,
    image: Option<String>,
    description: Option<String>,
    stock: Option<u32>,
) -> ProductDescriptor {
    ProductDescriptor {
        id: id.map(Value::String),
        legacy_id: None,
        name,
        price: price.map(Value::String),
        image,
        description,
        stock: stock.map(Value::from),
    }
}

/// Add one unit of a product.
pub fn add(store: &mut CartStore, product: &ProductDescriptor) -> ProductId {
    let id = store.add_item(product);
    let quantity = store.item(&id).map_or(0, |item| item.quantity);
    info!(%id, quantity, total_quantity = store.total_quantity(), "Added to cart");
    id
}

/// Set a line's quantity.
pub fn set(store: &mut CartStore, id: &str, quantity: i64) {
    let id = ProductId::from(id);
    if store.item(&id).is_none() {
        info!(%id, "Not in cart, nothing to update");
        return;
    }
    store.set_quantity(&id, quantity);
    info!(%id, quantity, total_quantity = store.total_quantity(), "Updated quantity");
}

/// Remove a line.
pub fn remove(store: &mut CartStore, id: &str) {
    let id = ProductId::from(id);
    if store.item(&id).is_none() {
        info!(%id, "Not in cart, nothing to remove");
        return;
    }
    store.remove_item(&id);
    info!(%id, total_quantity = store.total_quantity(), "Removed from cart");
}

/// Take one unit off a line.
pub fn decrement(store: &mut CartStore, id: &str) {
    let id = ProductId::from(id);
    if store.item(&id).is_none() {
        info!(%id, "Not in cart, nothing to decrement");
        return;
    }
    store.decrement_item(&id);
    info!(%id, total_quantity = store.total_quantity(), "Decremented");
}

/// Empty the cart.
pub fn clear(store: &mut CartStore) {
    store.clear_cart();
    info!("Cart cleared");
}

/// Confirm the order, emptying the cart.
pub fn checkout(store: &mut CartStore) -> OrderConfirmation {
    if store.is_empty() {
        info!("Checking out an empty cart");
    }
    store.confirm_order()
}
