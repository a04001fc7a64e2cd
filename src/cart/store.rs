//! Cart Store
//!
//! Owns the shopper's cart, persists it to a [`CartStorage`] after every
//! mutation and restores it when opened.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::products::{Product, ProductUuid};

use super::{Cart, CartStorage, CheckoutItem};

/// Storage key used when none is given.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Cart store backed by `S`.
///
/// The in-memory cart is authoritative. Persistence failures are logged and
/// otherwise ignored so that shopping never fails because storage did.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart stored under [`DEFAULT_CART_KEY`].
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_CART_KEY)
    }

    /// Open the cart stored under `key`.
    ///
    /// A missing, unreadable or corrupt snapshot yields an empty cart.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let cart = match storage.read(&key) {
            Ok(Some(raw)) => Cart::from_snapshot(&raw).unwrap_or_else(|error| {
                warn!(key = %key, error = %error, "discarding corrupt cart snapshot");

                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(key = %key, error = %error, "failed to read cart snapshot");

                Cart::new()
            }
        };

        debug!(key = %key, lines = cart.len(), "opened cart");

        Self { cart, storage, key }
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current cart total.
    pub fn cart_total(&self) -> Decimal {
        self.cart.total()
    }

    /// Total number of units in the cart.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Product and quantity pairs for checkout.
    pub fn checkout_items(&self) -> Vec<CheckoutItem> {
        self.cart.checkout_items()
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    pub fn add_to_cart(&mut self, product: Product, quantity: u32) {
        self.cart.add(product, quantity);
        self.persist();
    }

    /// Remove the line for `product`.
    pub fn remove_from_cart(&mut self, product: ProductUuid) {
        if self.cart.remove(product) {
            self.persist();
        }
    }

    /// Set the quantity for `product`. Absent products are ignored.
    pub fn update_quantity(&mut self, product: ProductUuid, quantity: u32) {
        if self.cart.update_quantity(product, quantity) {
            self.persist();
        }
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    fn persist(&self) {
        let snapshot = match self.cart.to_snapshot() {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(key = %self.key, error = %error, "failed to encode cart snapshot");

                return;
            }
        };

        if let Err(error) = self.storage.write(&self.key, &snapshot) {
            warn!(key = %self.key, error = %error, "failed to persist cart snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use testresult::TestResult;

    use crate::cart::{CartStorageError, MemoryCartStorage};

    use super::*;

    #[derive(Debug, Default)]
    struct BrokenStorage {
        writes: Cell<usize>,
    }

    impl CartStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, CartStorageError> {
            Err(CartStorageError::Unavailable)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), CartStorageError> {
            self.writes.set(self.writes.get() + 1);

            Err(CartStorageError::Unavailable)
        }
    }

    fn product(name: &str, price: Decimal) -> Product {
        Product::new(ProductUuid::new(), name, price)
    }

    #[test]
    fn reopening_restores_cart() {
        let storage = MemoryCartStorage::new();
        let mug = product("Mug", Decimal::new(1250, 2));
        let tee = product("Tee", Decimal::new(2000, 2));

        let mut store = CartStore::open(storage.clone());

        store.add_to_cart(mug.clone(), 2);
        store.add_to_cart(tee.clone(), 1);
        store.update_quantity(tee.uuid, 3);

        let reopened = CartStore::open(storage);

        assert_eq!(reopened.cart(), store.cart());
        assert_eq!(reopened.cart_total(), Decimal::new(8500, 2));
    }

    #[test]
    fn corrupt_snapshot_opens_empty_cart() -> TestResult {
        let storage = MemoryCartStorage::new();

        storage.write(DEFAULT_CART_KEY, "{not json")?;

        let store = CartStore::open(storage);

        assert!(store.cart().is_empty());
        assert_eq!(store.cart_total(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn missing_snapshot_opens_empty_cart() {
        let store = CartStore::open(MemoryCartStorage::new());

        assert!(store.cart().is_empty());
    }

    #[test]
    fn keys_are_isolated() {
        let storage = MemoryCartStorage::new();

        let mut first = CartStore::open_with_key(storage.clone(), "first");

        first.add_to_cart(product("Mug", Decimal::ONE), 1);

        let second = CartStore::open_with_key(storage, "second");

        assert!(second.cart().is_empty());
    }

    #[test]
    fn clear_cart_persists_empty_snapshot() -> TestResult {
        let storage = MemoryCartStorage::new();
        let mut store = CartStore::open(storage.clone());

        store.add_to_cart(product("Mug", Decimal::ONE), 1);
        store.clear_cart();

        assert_eq!(storage.read(DEFAULT_CART_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn storage_failures_do_not_interrupt_shopping() {
        let mug = product("Mug", Decimal::new(500, 2));
        let mut store = CartStore::open(BrokenStorage::default());

        store.add_to_cart(mug.clone(), 2);
        store.add_to_cart(mug.clone(), 1);

        assert_eq!(store.cart_total(), Decimal::new(1500, 2));
        assert_eq!(store.item_count(), 3);
        assert_eq!(store.storage().writes.get(), 2);
    }

    #[test]
    fn no_op_mutations_skip_persistence() {
        let mut store = CartStore::open(BrokenStorage::default());

        store.remove_from_cart(ProductUuid::new());
        store.update_quantity(ProductUuid::new(), 2);

        assert_eq!(store.storage().writes.get(), 0);
    }

    #[test]
    fn file_backed_store_survives_reopen() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mug = product("Mug", Decimal::new(999, 2));

        let mut store = CartStore::open(crate::cart::FileCartStorage::new(dir.path()));

        store.add_to_cart(mug.clone(), 4);

        let reopened = CartStore::open(crate::cart::FileCartStorage::new(dir.path()));

        assert_eq!(reopened.checkout_items(), store.checkout_items());
        assert_eq!(reopened.cart_total(), Decimal::new(3996, 2));

        Ok(())
    }
}
