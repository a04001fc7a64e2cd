//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use storefront_app::domain::products::records::{ProductRecord, ProductUuid};

    pub(super) fn make_product(uuid: ProductUuid, price: Decimal) -> ProductRecord {
        ProductRecord {
            uuid,
            name: "Kente Scarf".to_string(),
            description: "Handwoven in Bonwire".to_string(),
            price,
            category: "accessories".to_string(),
            images: vec!["/images/kente.jpg".to_string()],
            stock: 10,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
