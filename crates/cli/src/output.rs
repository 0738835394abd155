//! Terminal output for cart listings.
//!
//! Everything else the CLI says goes through `tracing` on stderr; only the
//! listings requested by the user are written to stdout.

#![allow(clippy::print_stdout)]

use std::fmt::Write as _;

use techstore_cart::{CartState, CartView, OrderConfirmation};
use techstore_core::format_amount;

/// Render a cart view as a plain-text table.
pub fn render_cart(view: &CartView) -> String {
    if view.items.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<32} {:>5} {:>12} {:>12}",
        "ID", "NAME", "QTY", "PRICE", "LINE"
    );
    for item in &view.items {
        let marker = if item.can_increment { "" } else { " (max)" };
        let _ = writeln!(
            out,
            "{:<20} {:<32} {:>5} {:>12} {:>12}{marker}",
            item.id, item.name, item.quantity, item.price, item.line_price
        );
    }
    let _ = writeln!(out, "{} item(s), subtotal {}", view.item_count, view.subtotal);
    out
}

/// Print a cart view.
pub fn print_cart(view: &CartView) {
    print!("{}", render_cart(view));
}

/// Print the cart in its persisted JSON shape.
///
/// # Errors
///
/// Returns the serialization error, which only happens for unrepresentable
/// amounts.
pub fn print_json(state: &CartState) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}

/// Print an order confirmation.
pub fn print_confirmation(confirmation: &OrderConfirmation) {
    println!("Order {} confirmed", confirmation.reference);
    println!(
        "{} item(s), total {}",
        confirmation.total_quantity,
        format_amount(confirmation.total_amount)
    );
}
