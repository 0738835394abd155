//! Techstore Cart - the storefront's shopping cart store.
//!
//! One store owns the cart: a list of line items plus running
//! `totalQuantity`/`totalAmount` aggregates, mutated only through a small set
//! of total operations (add, set quantity, remove, decrement, clear) and
//! optionally persisted to local key-value storage after every change.
//!
//! # Architecture
//!
//! - [`state`] - `CartState` and the `CartAction` reducer
//! - [`store`] - `CartStore`: dispatch, persistence, memoized selectors
//! - [`item`] - line items and descriptor normalization
//! - [`storage`] - the `KeyValueStorage` seam and its backends
//! - [`view`] - display projections for badges and cart panels
//! - [`checkout`] - order confirmation snapshots
//! - [`config`] - environment-driven configuration
//!
//! No cart operation returns an error. Bad input degrades to defaults,
//! operations on unknown ids are no-ops and storage failures are logged.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod item;
pub mod state;
pub mod storage;
pub mod store;
pub mod view;

pub use checkout::OrderConfirmation;
pub use config::{CartConfig, ConfigError};
pub use item::CartLineItem;
pub use state::{CartAction, CartState, InvalidCart};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::CartStore;
pub use view::{CartItemView, CartSummary, CartView};

pub use techstore_core::{Price, ProductDescriptor, ProductId};
