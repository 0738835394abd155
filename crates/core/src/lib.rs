//! Techstore Core - Shared types library.
//!
//! This crate provides the types shared by the cart store and its consumers:
//! - `cart` - The cart store, its storage backends and selectors
//! - `cli` - Command-line driver for a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types and coercion rules - no I/O, no storage,
//! no logging. Product descriptors arrive here in whatever shape the catalog
//! API produced them and leave as well-typed ids and prices.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices and the inbound product descriptor

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
