//! Core types for Techstore.
//!
//! This module provides type-safe wrappers for the catalog concepts the cart
//! depends on.

pub mod id;
pub mod price;
pub mod product;

pub use id::ProductId;
pub use price::{MAX_PRICE_UNITS, Price, format_amount};
pub use product::{ProductDescriptor, coerce_stock};
