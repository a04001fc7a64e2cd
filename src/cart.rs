//! Cart
//!
//! The cart is an ordered list of [`CartLine`]s (insertion order is display
//! order) with at most one line per product, plus a derived total that is
//! recomputed after every mutation.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    pricing::total_price,
    products::{Product, ProductUuid},
};

mod line;
mod storage;
mod store;

pub use line::CartLine;
pub use storage::{CartStorage, CartStorageError, FileCartStorage, MemoryCartStorage};
pub use store::{CartStore, DEFAULT_CART_KEY};

/// Errors raised while encoding or decoding a persisted cart snapshot.
#[derive(Debug, Error)]
pub enum CartSnapshotError {
    /// The stored value is not a serialized list of cart lines.
    #[error("cart snapshot is not valid cart data")]
    Corrupt(#[source] serde_json::Error),

    /// The cart could not be serialized.
    #[error("failed to encode cart snapshot")]
    Encode(#[source] serde_json::Error),
}

/// Product and quantity pair handed to order creation at checkout.
///
/// Prices are deliberately absent: the order service prices items from the
/// catalog when the order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckoutItem {
    /// Product identifier
    pub product: ProductUuid,

    /// Number of units
    pub quantity: u32,
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    total: Decimal,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from lines, merging any lines that share a product.
    ///
    /// The first occurrence of a product keeps its position and snapshot.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines {
            cart.merge(line.product, line.quantity);
        }

        cart.recalculate();

        cart
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of `price × quantity` over every line.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Find the line for a product.
    pub fn line(&self, product: ProductUuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.uuid == product)
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the same product has its quantity increased and
    /// keeps its original snapshot; otherwise a new line is appended. The
    /// quantity is not clamped here, callers are expected to pass at least 1.
    pub fn add(&mut self, product: Product, quantity: u32) {
        self.merge(product, quantity);
        self.recalculate();
    }

    /// Remove the line for `product`. Returns `false` if there was none.
    pub fn remove(&mut self, product: ProductUuid) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.product.uuid != product);

        let removed = self.lines.len() != before;

        if removed {
            self.recalculate();
        }

        removed
    }

    /// Replace the quantity of the line for `product`. Returns `false` if
    /// there was no such line.
    pub fn update_quantity(&mut self, product: ProductUuid, quantity: u32) -> bool {
        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.uuid == product)
        else {
            return false;
        };

        line.quantity = quantity;

        self.recalculate();

        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recalculate();
    }

    /// Product and quantity pairs for order creation.
    pub fn checkout_items(&self) -> Vec<CheckoutItem> {
        self.lines
            .iter()
            .map(|line| CheckoutItem {
                product: line.product.uuid,
                quantity: line.quantity,
            })
            .collect()
    }

    /// Serialize the lines as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`CartSnapshotError::Encode`] if serialization fails.
    pub fn to_snapshot(&self) -> Result<String, CartSnapshotError> {
        serde_json::to_string(&self.lines).map_err(CartSnapshotError::Encode)
    }

    /// Rebuild a cart from a JSON array of lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartSnapshotError::Corrupt`] if `raw` is not a list of cart lines.
    pub fn from_snapshot(raw: &str) -> Result<Self, CartSnapshotError> {
        let lines: Vec<CartLine> = serde_json::from_str(raw).map_err(CartSnapshotError::Corrupt)?;

        Ok(Self::from_lines(lines))
    }

    fn merge(&mut self, product: Product, quantity: u32) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.uuid == product.uuid)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine::new(product, quantity)),
        }
    }

    fn recalculate(&mut self) {
        self.total = total_price(
            self.lines
                .iter()
                .map(|line| (line.product.price, line.quantity)),
        );
    }
}
