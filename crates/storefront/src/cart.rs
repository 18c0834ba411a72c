//! Shopping cart store.
//!
//! The cart is an ordered list of line items plus an "is the cart panel
//! open" flag. Every mutation of the list is written through to storage under
//! [`keys::CART`]; the panel flag is UI state and never persisted.
//!
//! Storage failures never undo an in-memory mutation. They are logged and
//! the next successful write brings storage back in line.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use sweet_shop_core::{CurrencyCode, Price, Sweet, SweetId};

use crate::storage::{KeyValueStorage, keys};

/// One sweet in the cart with its chosen quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: SweetId,
    pub name: String,
    /// Unit price captured when the sweet was first added.
    pub price: Decimal,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    pub quantity: u32,
    /// Stock ceiling captured when the sweet was first added.
    pub max_quantity: u32,
}

impl CartLineItem {
    fn from_sweet(sweet: &Sweet, quantity: u32) -> Self {
        Self {
            id: sweet.id,
            name: sweet.name.clone(),
            price: sweet.price,
            image: sweet.image.clone(),
            quantity,
            max_quantity: sweet.quantity,
        }
    }

    /// Unit price times quantity, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Older carts stored a missing image as `null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// What [`CartStore::load_cart`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLoad {
    /// Nothing stored; the in-memory cart was left as it was.
    Missing,
    /// The stored cart replaced the in-memory one.
    Restored { items: usize },
    /// The stored cart could not be read or parsed; the cart is now empty.
    Discarded,
}

/// Cart state bound to a storage handle.
///
/// Construct one per application (see [`crate::state::ShopState`]) and pass
/// it by reference to whatever needs it.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    items: Vec<CartLineItem>,
    is_open: bool,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create an empty, closed cart. Call [`Self::load_cart`] to rehydrate.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            items: Vec::new(),
            is_open: false,
        }
    }

    /// The storage handle this cart writes through to.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Current line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: SweetId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` of `sweet`.
    ///
    /// An existing line keeps its captured name, price and ceiling and only
    /// has its quantity increased. The increase is not capped at the ceiling;
    /// [`Self::update_cart_item_quantity`] is the only operation that clamps.
    /// Adding zero does nothing.
    #[instrument(skip(self, sweet), fields(sweet_id = %sweet.id))]
    pub fn add_to_cart(&mut self, sweet: &Sweet, quantity: u32) {
        if quantity == 0 {
            tracing::debug!("Ignoring add of zero quantity");
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|item| item.id == sweet.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            tracing::debug!(quantity = existing.quantity, "Increased cart line");
        } else {
            self.items.push(CartLineItem::from_sweet(sweet, quantity));
            tracing::debug!(quantity, "Added cart line");
        }

        self.persist();
    }

    /// Add a single unit of `sweet`.
    pub fn add_one(&mut self, sweet: &Sweet) {
        self.add_to_cart(sweet, 1);
    }

    /// Remove the line for `id`. Missing ids are ignored.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: SweetId) {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return;
        };

        self.items.remove(index);
        tracing::debug!("Removed cart line");
        self.persist();
    }

    /// Set the quantity for `id`, clamped to the line's ceiling.
    ///
    /// A quantity of zero or less removes the line. Missing ids are ignored.
    #[instrument(skip(self))]
    pub fn update_cart_item_quantity(&mut self, id: SweetId, quantity: i64) {
        if self.get(id).is_none() {
            return;
        }

        let Ok(requested) = u32::try_from(quantity) else {
            if quantity <= 0 {
                self.remove_from_cart(id);
                return;
            }
            // Larger than any ceiling.
            self.set_quantity(id, u32::MAX);
            return;
        };

        if requested == 0 {
            self.remove_from_cart(id);
        } else {
            self.set_quantity(id, requested);
        }
    }

    fn set_quantity(&mut self, id: SweetId, requested: u32) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = requested.min(item.max_quantity);
            tracing::debug!(quantity = item.quantity, "Updated cart line");
        }
        self.persist();
    }

    /// Empty the cart and delete the stored copy.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.items.clear();
        if let Err(e) = self.storage.remove_item(keys::CART) {
            tracing::warn!(error = %e, "Failed to remove stored cart");
        }
        tracing::debug!("Cleared cart");
    }

    /// Replace the cart with the stored copy, if there is one.
    ///
    /// The stored lines are trusted as-is: prices and ceilings are not checked
    /// against the catalog. Unreadable data empties the cart instead of
    /// failing.
    #[instrument(skip(self))]
    pub fn load_cart(&mut self) -> CartLoad {
        let raw = match self.storage.get_item(keys::CART) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CartLoad::Missing,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart, starting empty");
                self.items.clear();
                return CartLoad::Discarded;
            }
        };

        match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                tracing::debug!(items = count, "Restored cart");
                CartLoad::Restored { items: count }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored cart is malformed, starting empty");
                self.items.clear();
                CartLoad::Discarded
            }
        }
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(keys::CART, &json) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Total number of units across all lines.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of price times quantity across all lines.
    ///
    /// Restored carts are not checked against the catalog, so a stored price
    /// can be absurd. The total saturates at the `Decimal` bounds instead of
    /// overflowing.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// [`Self::cart_total`] as a [`Price`] in `currency_code`.
    #[must_use]
    pub fn cart_total_price(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.cart_total(), currency_code)
    }

    #[must_use]
    pub fn is_cart_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Panel visibility
    // =========================================================================

    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.is_open
    }

    pub const fn open_cart(&mut self) {
        self.is_open = true;
    }

    pub const fn close_cart(&mut self) {
        self.is_open = false;
    }

    pub const fn toggle_cart(&mut self) {
        self.is_open = !self.is_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn sweet(id: i32, price: i64, stock: u32) -> Sweet {
        Sweet::new(SweetId::new(id), format!("Sweet {id}"), Decimal::from(price), stock)
    }

    fn stored_lines(storage: &MemoryStorage) -> Option<Vec<CartLineItem>> {
        storage
            .get_item(keys::CART)
            .expect("get")
            .map(|raw| serde_json::from_str(&raw).expect("stored cart parses"))
    }

    #[test]
    fn test_new_cart_is_empty_and_closed() {
        let cart = CartStore::new(MemoryStorage::new());
        assert!(cart.is_cart_empty());
        assert!(!cart.is_cart_open());
        assert_eq!(cart.cart_item_count(), 0);
        assert_eq!(cart.cart_total(), Decimal::ZERO);
    }

    #[test]
    fn test_add_same_id_merges_without_clamping() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone());
        let jalebi = sweet(1, 10, 2);

        cart.add_one(&jalebi);
        cart.add_to_cart(&jalebi, 2);

        assert_eq!(cart.items().len(), 1);
        let line = cart.get(SweetId::new(1)).expect("line");
        assert_eq!(line.quantity, 3);
        assert_eq!(line.max_quantity, 2);
        assert_eq!(cart.cart_total(), Decimal::from(30));
        assert_eq!(stored_lines(&storage).expect("persisted"), cart.items());
    }

    #[test]
    fn test_add_existing_keeps_captured_price() {
        let mut cart = CartStore::new(MemoryStorage::new());
        cart.add_one(&sweet(1, 10, 5));
        cart.add_one(&sweet(1, 99, 50));

        let line = cart.get(SweetId::new(1)).expect("line");
        assert_eq!(line.price, Decimal::from(10));
        assert_eq!(line.max_quantity, 5);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone());
        cart.add_to_cart(&sweet(1, 10, 5), 0);

        assert!(cart.is_cart_empty());
        assert_eq!(stored_lines(&storage), None);
    }

    #[test]
    fn test_distinct_adds_keep_insertion_order() {
        let mut cart = CartStore::new(MemoryStorage::new());
        cart.add_to_cart(&sweet(3, 1, 9), 2);
        cart.add_to_cart(&sweet(1, 2, 9), 4);
        cart.add_to_cart(&sweet(2, 3, 9), 1);

        let ids: Vec<i32> = cart.items().iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(cart.cart_item_count(), 7);
        assert_eq!(cart.cart_total(), Decimal::from(2 + 8 + 3));
    }

    #[test]
    fn test_remove_missing_id_changes_nothing() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone());
        cart.add_one(&sweet(1, 10, 5));
        let before = cart.items().to_vec();

        cart.remove_from_cart(SweetId::new(99));

        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(stored_lines(&storage).expect("persisted"), before);
    }

    #[test]
    fn test_remove_persists() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone());
        cart.add_one(&sweet(1, 10, 5));
        cart.add_one(&sweet(2, 10, 5));

        cart.remove_from_cart(SweetId::new(1));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(stored_lines(&storage).expect("persisted").len(), 1);
    }

    #[test]
    fn test_update_clamps_to_ceiling() {
        let mut cart = CartStore::new(MemoryStorage::new());
        cart.add_to_cart(&sweet(2, 4, 3), 3);

        cart.update_cart_item_quantity(SweetId::new(2), 5);
        assert_eq!(cart.get(SweetId::new(2)).expect("line").quantity, 3);

        cart.update_cart_item_quantity(SweetId::new(2), i64::MAX);
        assert_eq!(cart.get(SweetId::new(2)).expect("line").quantity, 3);

        cart.update_cart_item_quantity(SweetId::new(2), 1);
        assert_eq!(cart.get(SweetId::new(2)).expect("line").quantity, 1);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut cart = CartStore::new(MemoryStorage::new());
        cart.add_one(&sweet(1, 1, 5));
        cart.add_one(&sweet(2, 1, 5));

        cart.update_cart_item_quantity(SweetId::new(1), 0);
        cart.update_cart_item_quantity(SweetId::new(2), -4);

        assert!(cart.is_cart_empty());
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone());
        cart.update_cart_item_quantity(SweetId::new(1), 3);

        assert!(cart.is_cart_empty());
        assert_eq!(stored_lines(&storage), None);
    }

    #[test]
    fn test_clear_removes_stored_entry() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone());
        cart.add_one(&sweet(1, 1, 5));

        cart.clear_cart();

        assert!(cart.is_cart_empty());
        assert_eq!(storage.get_item(keys::CART).expect("get"), None);
        assert_eq!(cart.load_cart(), CartLoad::Missing);
        assert!(cart.is_cart_empty());
    }

    #[test]
    fn test_load_replaces_wholesale() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                keys::CART,
                r#"[{"id":5,"name":"Barfi","price":2.5,"image":"barfi.png","quantity":4,"maxQuantity":10}]"#,
            )
            .expect("seed");

        let mut cart = CartStore::new(storage);
        cart.add_one(&sweet(1, 1, 5));

        assert_eq!(cart.load_cart(), CartLoad::Restored { items: 1 });
        assert!(cart.get(SweetId::new(1)).is_none());
        let line = cart.get(SweetId::new(5)).expect("restored line");
        assert_eq!(line.max_quantity, 10);
        assert_eq!(cart.cart_total(), Decimal::from(10));
    }

    #[test]
    fn test_load_accepts_null_image() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                keys::CART,
                r#"[{"id":7,"name":"Ladoo","price":"1.25","image":null,"quantity":2,"maxQuantity":4}]"#,
            )
            .expect("seed");

        let mut cart = CartStore::new(storage);

        assert_eq!(cart.load_cart(), CartLoad::Restored { items: 1 });
        let line = cart.get(SweetId::new(7)).expect("restored line");
        assert_eq!(line.image, "");
        assert_eq!(cart.cart_total(), Decimal::new(250, 2));
    }

    #[test]
    fn test_huge_restored_prices_saturate_total() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                keys::CART,
                r#"[{"id":1,"name":"Gold Leaf","price":"79228162514264337593543950335","quantity":2,"maxQuantity":2},
                    {"id":2,"name":"More Gold","price":"79228162514264337593543950335","quantity":1,"maxQuantity":1}]"#,
            )
            .expect("seed");

        let mut cart = CartStore::new(storage);
        assert_eq!(cart.load_cart(), CartLoad::Restored { items: 2 });

        let line = cart.get(SweetId::new(1)).expect("line");
        assert_eq!(line.line_total(), Decimal::MAX);
        assert_eq!(cart.cart_total(), Decimal::MAX);
        assert_eq!(cart.cart_total_price(CurrencyCode::USD).amount, Decimal::MAX);
    }

    #[test]
    fn test_load_malformed_yields_empty_cart() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::CART, "{not json").expect("seed");

        let mut cart = CartStore::new(storage);
        cart.add_one(&sweet(1, 1, 5));
        // The add above overwrote the garbage, so plant it again.
        cart.storage().set_item(keys::CART, "[{\"id\":1}]").expect("seed");

        assert_eq!(cart.load_cart(), CartLoad::Discarded);
        assert!(cart.is_cart_empty());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_mutation() {
        let storage = MemoryStorage::with_quota(8);
        let mut cart = CartStore::new(storage.clone());

        cart.add_to_cart(&sweet(1, 10, 5), 2);

        assert_eq!(cart.cart_item_count(), 2);
        assert!(matches!(
            storage.set_item(keys::CART, "[]"),
            Err(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(storage.get_item(keys::CART).expect("get"), None);
    }

    #[test]
    fn test_panel_visibility_is_not_persisted() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone());

        cart.open_cart();
        assert!(cart.is_cart_open());
        cart.toggle_cart();
        assert!(!cart.is_cart_open());
        cart.toggle_cart();
        cart.close_cart();
        assert!(!cart.is_cart_open());

        assert!(storage.is_empty().expect("len"));
    }

    #[test]
    fn test_total_price_formats() {
        let mut cart = CartStore::new(MemoryStorage::new());
        cart.add_to_cart(&sweet(1, 3, 5), 2);
        assert_eq!(cart.cart_total_price(CurrencyCode::USD).display(), "$6.00");
    }
}
