//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::products::Product;

pub use storefront::products::ProductUuid;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub images: Vec<String>,
    pub stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            uuid: record.uuid,
            name: record.name,
            description: record.description,
            price: record.price,
            category: record.category,
            images: record.images.into_iter().collect(),
        }
    }
}
