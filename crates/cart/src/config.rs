//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TECHSTORE_CART_DIR` - Directory the cart file is stored in (default: .techstore)
//! - `TECHSTORE_CART_KEY` - Storage key the cart is persisted under (default: cart)
//! - `TECHSTORE_CART_PERSIST` - Whether to persist the cart at all (default: true)

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::{DEFAULT_CART_KEY, is_valid_key};

const DEFAULT_CART_DIR: &str = ".techstore";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for file-backed storage
    pub storage_dir: PathBuf,
    /// Key the cart is stored under
    pub storage_key: String,
    /// Whether mutations are written to storage
    pub persist: bool,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_CART_DIR),
            storage_key: DEFAULT_CART_KEY.to_string(),
            persist: true,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = PathBuf::from(
            lookup("TECHSTORE_CART_DIR").unwrap_or_else(|| DEFAULT_CART_DIR.to_string()),
        );

        let storage_key =
            lookup("TECHSTORE_CART_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
        if !is_valid_key(&storage_key) {
            return Err(ConfigError::InvalidEnvVar(
                "TECHSTORE_CART_KEY".to_string(),
                format!("'{storage_key}' must be letters, digits, '-', '_' or '.'"),
            ));
        }

        let persist = match lookup("TECHSTORE_CART_PERSIST") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "TECHSTORE_CART_PERSIST".to_string(),
                    format!("expected true/false, got '{value}'"),
                )
            })?,
            None => true,
        };

        Ok(Self {
            storage_dir,
            storage_key,
            persist,
        })
    }
}

/// Parse a boolean flag (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`).
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
