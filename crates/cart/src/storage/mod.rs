//! Local key-value storage for persisted carts.
//!
//! The storefront keeps its cart in browser-style local storage: a flat map of
//! string keys to string values. [`KeyValueStorage`] is that seam; the store
//! only ever reads and writes one well-known key through it.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map, optionally with a byte quota
//! - [`FileStorage`] - one JSON file per key under a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Default key the cart is persisted under.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Whether `key` can be used with every backend.
///
/// Keys are non-empty ASCII alphanumerics plus `-`, `_` and `.`, with no
/// `..` sequence, so a key always maps to a single file name.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && !key.contains("..")
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Errors raised by storage backends.
///
/// The cart store never surfaces these: a failed write is logged and the
/// in-memory cart stays authoritative.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the value would exceed the backend's quota.
    #[error("storage quota exceeded writing {key} ({needed} bytes, limit {limit})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// The key cannot be represented by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The cart could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string-keyed, string-valued local store.
pub trait KeyValueStorage {
    /// Read the value under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write fails or exceeds a quota.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
