//! Command implementations.
//!
//! - `cart` - single-product mutations and checkout
//! - `import` - adding catalog exports from JSON files

pub mod cart;
pub mod import;
