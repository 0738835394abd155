//! Integration tests for the Techstore cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techstore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - end-to-end store behaviour through the public API
//! - `cart_persistence` - restoring carts across sessions and storage failures
//! - `cart_invariants` - aggregate invariants over randomized action sequences
//!
//! This library holds the fixtures those tests share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;

use techstore_core::ProductDescriptor;

/// A small catalog in the heterogeneous shapes the product API produces.
#[must_use]
pub fn catalog() -> Vec<ProductDescriptor> {
    [
        json!({ "id": "tp-x1", "name": "ThinkPad X1 Carbon", "price": 1499, "stock": 3 }),
        json!({ "_id": "64f1a2", "name": "MacBook Air 13", "price": "1099.00", "image": "/img/mba.png" }),
        json!({ "id": 42, "_id": "ignored", "name": "Dell XPS 15", "price": 1899.99, "stock": "2" }),
        json!({ "id": "hub-7", "name": "USB-C Hub", "price": "39.95" }),
        json!({ "id": "sleeve", "name": "Laptop Sleeve", "price": "n/a" }),
    ]
    .into_iter()
    .filter_map(|value| serde_json::from_value(value).ok())
    .collect()
}

/// A fresh, not-yet-created directory under the system temp dir.
#[must_use]
pub fn temp_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::new_v4()))
}

/// Parse a decimal literal.
///
/// # Panics
///
/// Panics if `s` is not a decimal number.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}
