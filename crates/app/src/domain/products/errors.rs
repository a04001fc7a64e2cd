//! Products service errors.

use thiserror::Error;

use crate::domain::{errors::RepositoryError, pagination::PaginationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    #[error("name must not be blank")]
    BlankName,

    #[error("description must not be blank")]
    BlankDescription,

    #[error("category must not be blank")]
    BlankCategory,

    #[error("price must not be negative")]
    NegativePrice,

    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("invalid product: {0}")]
    Validation(#[from] ProductValidationError),

    #[error("administrator role required")]
    Forbidden,

    #[error("product not found")]
    NotFound,

    #[error("product already exists")]
    AlreadyExists,

    #[error("storage error")]
    Storage(#[source] RepositoryError),
}

impl From<RepositoryError> for ProductsServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::AlreadyExists => Self::AlreadyExists,
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}
