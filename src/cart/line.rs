//! Cart Lines

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{pricing::line_total, products::Product};

/// One product in the cart with the quantity the shopper intends to buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot taken when the line was created
    pub product: Product,

    /// Number of units
    pub quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Unit price multiplied by quantity.
    pub fn total(&self) -> Decimal {
        line_total(self.product.price, self.quantity)
    }
}
