//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, instrument};

use crate::{
    auth::Session,
    domain::{
        pagination::Page,
        products::{
            data::{NewProduct, ProductUpdate, ProductsQuery},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repositories::ProductsRepository,
        },
    },
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn ProductsRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(repository: Arc<dyn ProductsRepository>) -> Self {
        Self { repository }
    }
}

fn require_admin(session: &Session) -> Result<(), ProductsServiceError> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(ProductsServiceError::Forbidden)
    }
}

#[async_trait]
impl ProductsService for CatalogService {
    async fn list_products(
        &self,
        query: ProductsQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        Ok(self.repository.list_products(&query).await?)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        self.repository
            .get_product(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    #[instrument(skip(self, session, product), fields(user_uuid = %session.user, product_uuid = %product.uuid))]
    async fn create_product(
        &self,
        session: &Session,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        require_admin(session)?;

        product.validate()?;

        let created = self
            .repository
            .create_product(&product, Timestamp::now())
            .await?;

        info!("product created");

        Ok(created)
    }

    #[instrument(skip(self, session, update), fields(user_uuid = %session.user, product_uuid = %product))]
    async fn update_product(
        &self,
        session: &Session,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        require_admin(session)?;

        update.validate()?;

        let updated = self
            .repository
            .update_product(product, &update, Timestamp::now())
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        info!("product updated");

        Ok(updated)
    }

    #[instrument(skip(self, session), fields(user_uuid = %session.user, product_uuid = %product))]
    async fn delete_product(
        &self,
        session: &Session,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        require_admin(session)?;

        if !self.repository.delete_product(product).await? {
            return Err(ProductsServiceError::NotFound);
        }

        info!("product deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// One page of catalog products. Public.
    async fn list_products(
        &self,
        query: ProductsQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product. Public.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product. Administrators only.
    async fn create_product(
        &self,
        session: &Session,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update. Administrators only.
    async fn update_product(
        &self,
        session: &Session,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product. Administrators only.
    async fn delete_product(
        &self,
        session: &Session,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}
