//! Product identifiers.
//!
//! Catalog records are inconsistent about where they keep their identifier:
//! some expose `id`, some expose `_id`, some both, and the value may be a
//! string or a number. [`ProductId::normalize`] folds all of those shapes
//! into one string-backed id.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix for ids generated when a descriptor carries no usable identifier.
const GENERATED_PREFIX: &str = "item-";

/// A stable, normalized product identifier.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use techstore_core::ProductId;
///
/// let id = ProductId::normalize(Some(&json!(42)), None).unwrap();
/// assert_eq!(id.as_str(), "42");
///
/// let id = ProductId::normalize(None, Some(&json!("64f1c0ffee"))).unwrap();
/// assert_eq!(id.as_str(), "64f1c0ffee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an id from a string value as-is.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Pick the identifier out of the `id` and `_id` source fields.
    ///
    /// `id` wins when both are usable. Strings are trimmed; empty strings,
    /// booleans, arrays, objects and `null` are not usable ids.
    #[must_use]
    pub fn normalize(id: Option<&Value>, legacy_id: Option<&Value>) -> Option<Self> {
        id.and_then(id_from_value)
            .or_else(|| legacy_id.and_then(id_from_value))
    }

    /// Generate a fresh fallback id for a descriptor without one.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{GENERATED_PREFIX}{}", uuid::Uuid::new_v4().simple()))
    }

    /// Returns `true` if this id was produced by [`ProductId::generate`].
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.0.starts_with(GENERATED_PREFIX)
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn id_from_value(value: &Value) -> Option<ProductId> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| ProductId(trimmed.to_owned()))
        }
        Value::Number(n) => Some(ProductId(n.to_string())),
        _ => None,
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_prefers_id() {
        let id = ProductId::normalize(Some(&json!("abc")), Some(&json!("legacy")));
        assert_eq!(id, Some(ProductId::new("abc")));
    }

    #[test]
    fn test_normalize_falls_back_to_legacy_id() {
        let id = ProductId::normalize(None, Some(&json!("legacy")));
        assert_eq!(id, Some(ProductId::new("legacy")));

        // Blank `id` does not shadow a usable `_id`
        let id = ProductId::normalize(Some(&json!("   ")), Some(&json!("legacy")));
        assert_eq!(id, Some(ProductId::new("legacy")));
    }

    #[test]
    fn test_normalize_numeric_id() {
        let id = ProductId::normalize(Some(&json!(1001)), None).unwrap();
        assert_eq!(id.as_str(), "1001");
    }

    #[test]
    fn test_normalize_rejects_unusable_values() {
        assert!(ProductId::normalize(None, None).is_none());
        assert!(ProductId::normalize(Some(&json!(null)), Some(&json!(true))).is_none());
        assert!(ProductId::normalize(Some(&json!({"nested": 1})), None).is_none());
        assert!(ProductId::normalize(Some(&json!("")), Some(&json!([]))).is_none());
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let id = ProductId::normalize(Some(&json!("  sku-9 ")), None).unwrap();
        assert_eq!(id.as_str(), "sku-9");
    }

    #[test]
    fn test_generate_is_unique_and_marked() {
        let a = ProductId::generate();
        let b = ProductId::generate();
        assert_ne!(a, b);
        assert!(a.is_generated());
        assert!(!ProductId::new("A").is_generated());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("A")).unwrap();
        assert_eq!(json, "\"A\"");
    }
}
