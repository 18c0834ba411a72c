//! Integration tests for Sweet Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sweet-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart mutations, totals and storage write-through
//! - `navigation` - Route table and admin guard through the full state
//! - `persistence` - File-backed storage across simulated tabs and restarts
//!
//! This library holds the fixtures those tests share.

use rust_decimal::Decimal;
use sweet_shop_core::{Sweet, SweetId};
use sweet_shop_storefront::ShopConfig;

/// A sweet with a whole-number price.
#[must_use]
pub fn sweet(id: i32, price: i64, stock: u32) -> Sweet {
    Sweet::new(SweetId::new(id), format!("Sweet {id}"), Decimal::from(price), stock)
}

/// A sweet with a price in cents.
#[must_use]
pub fn sweet_cents(id: i32, cents: i64, stock: u32) -> Sweet {
    Sweet::new(SweetId::new(id), format!("Sweet {id}"), Decimal::new(cents, 2), stock)
}

/// Configuration with every variable at its default.
///
/// # Panics
///
/// Panics if the defaults fail to parse.
#[must_use]
pub fn default_config() -> ShopConfig {
    ShopConfig::from_lookup(|_| None).expect("default configuration parses")
}

/// Configuration pointing at a storage file.
///
/// # Panics
///
/// Panics if the defaults fail to parse.
#[must_use]
pub fn config_with_storage(path: &std::path::Path) -> ShopConfig {
    let path = path.display().to_string();
    ShopConfig::from_lookup(|key| (key == "SWEET_SHOP_STORAGE_PATH").then(|| path.clone()))
        .expect("configuration parses")
}
