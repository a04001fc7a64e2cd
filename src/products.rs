//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Catalog product as seen by the cart.
///
/// This is a snapshot taken when the product was added; the catalog owns the
/// authoritative record and the cart never writes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    #[serde(rename = "id")]
    pub uuid: ProductUuid,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Unit price
    pub price: Decimal,

    /// Product category
    #[serde(default)]
    pub category: String,

    /// Image references
    #[serde(default)]
    pub images: SmallVec<[String; 4]>,
}

impl Product {
    /// Create a product snapshot with the given name and price.
    pub fn new(uuid: ProductUuid, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            uuid,
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
            images: SmallVec::new(),
        }
    }
}
