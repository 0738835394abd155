//! The cart store.
//!
//! [`CartStore`] is the single owner of the shopping cart. UI events become
//! calls on the store; the store applies them through the [`CartState`]
//! reducer, persists the result and serves selectors back to the UI.
//!
//! # Persistence
//!
//! When constructed with storage, every mutation that changes the cart is
//! written under one key as `{ items, totalQuantity, totalAmount }`. Writes
//! are best-effort: a failed write is logged and the in-memory cart stays
//! authoritative for the rest of the session.
//!
//! # Example
//!
//! ```
//! use techstore_cart::{CartStore, MemoryStorage, ProductDescriptor};
//!
//! let storage = MemoryStorage::new();
//! let mut cart = CartStore::with_storage(storage.clone(), "cart");
//! cart.add_item(&ProductDescriptor::new("A", "ThinkPad", 1000));
//! cart.add_item(&ProductDescriptor::new("A", "ThinkPad", 1000));
//! assert_eq!(cart.total_quantity(), 2);
//!
//! // A later session restores the same cart.
//! let mut next = CartStore::with_storage(storage, "cart");
//! assert!(next.load_persisted());
//! assert_eq!(next.total_quantity(), 2);
//! ```

use std::cell::RefCell;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use techstore_core::{ProductDescriptor, ProductId};

use crate::checkout::OrderConfirmation;
use crate::config::CartConfig;
use crate::item::CartLineItem;
use crate::state::{CartAction, CartState, InvalidCart};
use crate::storage::{DEFAULT_CART_KEY, FileStorage, KeyValueStorage, StorageError};
use crate::view::{CartSummary, CartView};

/// Why a persisted cart could not be restored.
#[derive(Debug, Error)]
enum RestoreError {
    #[error("malformed cart JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid cart: {0}")]
    Invalid(#[from] InvalidCart),
}

/// The shopping cart store.
pub struct CartStore {
    state: CartState,
    storage: Option<Box<dyn KeyValueStorage>>,
    storage_key: String,
    /// Bumped on every change; keys the memoized item list.
    version: u64,
    items_cache: RefCell<Option<(u64, Arc<[CartLineItem]>)>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("persistent", &self.storage.is_some())
            .field("storage_key", &self.storage_key)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty, in-memory-only cart.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CartState::new(),
            storage: None,
            storage_key: DEFAULT_CART_KEY.to_string(),
            version: 0,
            items_cache: RefCell::new(None),
        }
    }

    /// Create an empty cart that persists under `key` in `storage`.
    ///
    /// Nothing is read until [`CartStore::load_persisted`] is called.
    #[must_use]
    pub fn with_storage(storage: impl KeyValueStorage + 'static, key: impl Into<String>) -> Self {
        Self {
            storage: Some(Box::new(storage)),
            storage_key: key.into(),
            ..Self::new()
        }
    }

    /// Create a cart from configuration: file-backed when persistence is
    /// enabled, in-memory otherwise.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        if config.persist {
            Self::with_storage(
                FileStorage::new(&config.storage_dir),
                config.storage_key.clone(),
            )
        } else {
            Self::new()
        }
    }

    /// Whether mutations are written to storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add one unit of a product, inserting a new line if needed.
    ///
    /// Returns the normalized id the product was filed under.
    pub fn add_item(&mut self, product: &ProductDescriptor) -> ProductId {
        let item = CartLineItem::from_descriptor(product);
        let id = item.id.clone();
        if id.is_generated() {
            tracing::debug!(%id, "Product has no usable id, generated one");
        }
        self.dispatch(CartAction::Add(item));
        id
    }

    /// Set a line's quantity; zero or below removes the line. Unknown ids are
    /// ignored.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) {
        self.dispatch(CartAction::SetQuantity {
            id: id.clone(),
            quantity,
        });
    }

    /// Remove a line regardless of quantity. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &ProductId) {
        self.dispatch(CartAction::Remove(id.clone()));
    }

    /// Take one unit off a line, removing it when it reaches zero. Unknown
    /// ids are ignored.
    pub fn decrement_item(&mut self, id: &ProductId) {
        self.dispatch(CartAction::Decrement(id.clone()));
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Snapshot the cart as a confirmed order, then clear it.
    pub fn confirm_order(&mut self) -> OrderConfirmation {
        let confirmation = OrderConfirmation::from_state(&self.state);
        tracing::info!(
            reference = %confirmation.reference,
            total_quantity = confirmation.total_quantity,
            "Order confirmed, clearing cart"
        );
        self.clear_cart();
        confirmation
    }

    /// Apply an action, persisting if it changed the cart.
    ///
    /// Returns `true` if the cart changed.
    pub fn dispatch(&mut self, action: CartAction) -> bool {
        let kind = action.kind();
        let changed = self.state.apply(action);
        if changed {
            self.version += 1;
            tracing::debug!(
                action = kind,
                total_quantity = self.state.total_quantity(),
                "Cart updated"
            );
            self.persist();
        } else {
            tracing::debug!(action = kind, "Cart action was a no-op");
        }
        changed
    }

    /// Restore the cart saved by a previous session.
    ///
    /// Returns `true` if a persisted cart was found and loaded. Missing,
    /// unreadable or malformed data leaves the current cart untouched.
    pub fn load_persisted(&mut self) -> bool {
        let Some(storage) = &self.storage else {
            return false;
        };

        let raw = match storage.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(key = %self.storage_key, error = %e, "Failed to read persisted cart");
                return false;
            }
        };

        match restore(&raw) {
            Ok(state) => {
                tracing::debug!(
                    key = %self.storage_key,
                    items = state.items().len(),
                    "Restored persisted cart"
                );
                self.state = state;
                self.version += 1;
                true
            }
            Err(e) => {
                tracing::warn!(key = %self.storage_key, error = %e, "Discarding persisted cart");
                false
            }
        }
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = write_state(storage.as_ref(), &self.storage_key, &self.state) {
            tracing::warn!(key = %self.storage_key, error = %e, "Failed to persist cart");
        }
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// The current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Total units across all lines.
    #[must_use]
    pub const fn total_quantity(&self) -> u64 {
        self.state.total_quantity()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn distinct_items(&self) -> usize {
        self.state.items().len()
    }

    /// Total monetary amount.
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.state.total_amount()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Look up a single line.
    #[must_use]
    pub fn item(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.state.item(id)
    }

    /// The line items, memoized.
    ///
    /// Returns the same shared allocation until the cart changes, so callers
    /// can compare with [`Arc::ptr_eq`] to skip needless re-renders.
    #[must_use]
    pub fn items(&self) -> Arc<[CartLineItem]> {
        let mut cache = self.items_cache.borrow_mut();
        if let Some((_, items)) = cache.as_ref().filter(|(version, _)| *version == self.version) {
            return Arc::clone(items);
        }
        let items: Arc<[CartLineItem]> = Arc::from(self.state.items());
        *cache = Some((self.version, Arc::clone(&items)));
        items
    }

    /// Whether the UI should allow adding another unit of `id`.
    #[must_use]
    pub fn can_increment(&self, id: &ProductId) -> bool {
        self.state.item(id).is_some_and(CartLineItem::can_increment)
    }

    /// Aggregate numbers for badges and summaries.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(&self.state)
    }

    /// Display projection of the cart.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from(&self.state)
    }
}

fn restore(raw: &str) -> Result<CartState, RestoreError> {
    Ok(serde_json::from_str::<CartState>(raw)?.validated()?)
}

fn write_state(
    storage: &dyn KeyValueStorage,
    key: &str,
    state: &CartState,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(state)?;
    storage.set(key, &json)
}
