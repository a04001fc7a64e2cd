//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::{pricing::line_total, uuids::TypedUuid};

use crate::{
    auth::UserUuid,
    domain::{
        orders::{
            data::ShippingAddress,
            status::{OrderStatus, PaymentStatus},
        },
        products::records::ProductUuid,
    },
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order line with the unit price fixed when the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub product: ProductUuid,
    pub quantity: u32,
    pub price_at_purchase: Decimal,
}

impl OrderItemRecord {
    #[must_use]
    pub fn total(&self) -> Decimal {
        line_total(self.price_at_purchase, self.quantity)
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub items: Vec<OrderItemRecord>,
    pub total_amount: Decimal,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of an administrative update.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStatusChange {
    pub previous: OrderStatus,
    pub order: OrderRecord,
}
