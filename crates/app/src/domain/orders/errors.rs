//! Orders service errors.

use thiserror::Error;

use crate::domain::{
    errors::RepositoryError, pagination::PaginationError, products::records::ProductUuid,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("an order needs at least one item")]
    NoItems,

    #[error("quantity for product {0} must be at least 1")]
    ZeroQuantity(ProductUuid),

    #[error("shipping address field `{0}` must not be blank")]
    BlankShippingField(&'static str),

    #[error("payment method must not be blank")]
    BlankPaymentMethod,

    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("invalid order: {0}")]
    Validation(#[from] OrderValidationError),

    #[error("not permitted to access this order")]
    Forbidden,

    #[error("order not found")]
    NotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("storage error")]
    Storage(#[source] RepositoryError),
}

impl From<RepositoryError> for OrdersServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}
