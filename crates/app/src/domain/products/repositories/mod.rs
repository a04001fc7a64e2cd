//! Products Repositories

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::domain::{
    errors::RepositoryError,
    pagination::Page,
    products::{
        data::{NewProduct, ProductUpdate, ProductsQuery},
        records::{ProductRecord, ProductUuid},
    },
};

mod memory;
mod postgres;

pub use memory::MemoryProductsRepository;
pub use postgres::PgProductsRepository;

#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// One page of products matching `query`.
    async fn list_products(
        &self,
        query: &ProductsQuery,
    ) -> Result<Page<ProductRecord>, RepositoryError>;

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, RepositoryError>;

    /// Every product among `products` that exists, in no particular order.
    async fn get_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, RepositoryError>;

    async fn create_product(
        &self,
        product: &NewProduct,
        now: Timestamp,
    ) -> Result<ProductRecord, RepositoryError>;

    /// Returns `None` if the product does not exist.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: &ProductUpdate,
        now: Timestamp,
    ) -> Result<Option<ProductRecord>, RepositoryError>;

    /// Returns `false` if the product did not exist.
    async fn delete_product(&self, product: ProductUuid) -> Result<bool, RepositoryError>;
}
