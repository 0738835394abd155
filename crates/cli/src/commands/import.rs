//! Add products from a catalog export.
//!
//! The file holds either a single product object or an array of them, in the
//! catalog API's own shape (`id`/`_id`, string-or-number prices).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use techstore_cart::CartStore;
use techstore_core::ProductDescriptor;

/// Errors reading a product file.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid product JSON in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductFile {
    Many(Vec<ProductDescriptor>),
    One(ProductDescriptor),
}

/// Parse one product or an array of products.
///
/// # Errors
///
/// Returns the JSON error if the content is neither shape.
pub fn parse_products(content: &str) -> Result<Vec<ProductDescriptor>, serde_json::Error> {
    Ok(match serde_json::from_str::<ProductFile>(content)? {
        ProductFile::Many(products) => products,
        ProductFile::One(product) => vec![product],
    })
}

/// Add every product in `path` to the cart, one unit each.
///
/// # Errors
///
/// Returns an [`ImportError`] if the file cannot be read or parsed. Nothing
/// is added in that case.
pub fn from_file(store: &mut CartStore, path: &Path) -> Result<usize, ImportError> {
    let path_display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path_display.clone(),
        source,
    })?;
    let products = parse_products(&content).map_err(|source| ImportError::Parse {
        path: path_display.clone(),
        source,
    })?;

    info!(path = %path_display, products = products.len(), "Adding products from file");
    for product in &products {
        let id = store.add_item(product);
        if id.is_generated() {
            warn!(%id, "Product without an id was added under a generated id");
        }
    }
    info!(total_quantity = store.total_quantity(), "Import complete");
    Ok(products.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use techstore_core::ProductId;

    use super::*;

    #[test]
    fn test_parse_single_object() {
        let products = parse_products(r#"{ "id": "A", "price": "10" }"#).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_id(), Some(ProductId::new("A")));
    }

    #[test]
    fn test_parse_array() {
        let products =
            parse_products(r#"[{ "id": "A", "price": 1 }, { "_id": "B", "price": "2" }]"#).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].product_id(), Some(ProductId::new("B")));
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(parse_products("42").is_err());
        assert!(parse_products("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("techstore-import-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{ "id": "A", "price": 500 }, { "id": "A", "price": 500 }, { "id": "B", "price": "700" }]"#,
        )
        .unwrap();

        let mut store = CartStore::new();
        assert_eq!(from_file(&mut store, &path).unwrap(), 3);
        assert_eq!(store.total_quantity(), 3);
        assert_eq!(store.distinct_items(), 2);
        assert_eq!(store.view().subtotal, "$1700.00");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_from_missing_file() {
        let mut store = CartStore::new();
        let err = from_file(&mut store, Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
        assert!(store.is_empty());
    }
}
