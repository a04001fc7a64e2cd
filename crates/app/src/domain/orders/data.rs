//! Orders Data

use serde::{Deserialize, Serialize};
use storefront::cart::CheckoutItem;

use crate::{
    auth::UserUuid,
    domain::{
        orders::{
            errors::OrderValidationError,
            status::{OrderStatus, PaymentStatus},
        },
        pagination::PageRequest,
        products::records::ProductUuid,
    },
};

/// Shipping address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingAddress {
    fn validate(&self) -> Result<(), OrderValidationError> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(OrderValidationError::BlankShippingField(field));
            }
        }

        Ok(())
    }
}

/// Product and quantity requested at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub quantity: u32,
}

impl From<CheckoutItem> for NewOrderItem {
    fn from(item: CheckoutItem) -> Self {
        Self {
            product: item.product,
            quantity: item.quantity,
        }
    }
}

/// Checkout request. Prices are looked up from the catalog, never supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
}

impl NewOrder {
    pub(crate) fn validate(&self) -> Result<(), OrderValidationError> {
        if self.items.is_empty() {
            return Err(OrderValidationError::NoItems);
        }

        if let Some(item) = self.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderValidationError::ZeroQuantity(item.product));
        }

        self.shipping_address.validate()?;

        if self.payment_method.trim().is_empty() {
            return Err(OrderValidationError::BlankPaymentMethod);
        }

        Ok(())
    }
}

/// Administrative order update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub payment_status: Option<PaymentStatus>,
}

impl OrderStatusUpdate {
    #[must_use]
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status,
            tracking_number: None,
            payment_status: None,
        }
    }
}

/// Caller-supplied listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrdersFilter {
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Resolved listing query handed to repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrdersQuery {
    /// Restrict to one owner; `None` lists every owner's orders
    pub user: Option<UserUuid>,
    pub status: Option<OrderStatus>,
    pub page: PageRequest,
}
