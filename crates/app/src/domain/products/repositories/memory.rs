//! In-memory products repository.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::{
    errors::RepositoryError,
    pagination::Page,
    products::{
        data::{DEFAULT_STOCK, NewProduct, ProductSort, ProductUpdate, ProductsQuery, SortDirection},
        records::{ProductRecord, ProductUuid},
    },
};

use super::ProductsRepository;

#[derive(Debug, Clone, Default)]
pub struct MemoryProductsRepository {
    products: Arc<RwLock<HashMap<ProductUuid, ProductRecord>>>,
}

impl MemoryProductsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(record: &ProductRecord, query: &ProductsQuery) -> bool {
    if query
        .category
        .as_deref()
        .is_some_and(|category| record.category != category)
    {
        return false;
    }

    match query.search.as_deref() {
        Some(search) => {
            let needle = search.to_lowercase();

            record.name.to_lowercase().contains(&needle)
                || record.description.to_lowercase().contains(&needle)
        }
        None => true,
    }
}

fn compare(a: &ProductRecord, b: &ProductRecord, sort: ProductSort) -> Ordering {
    let primary = match sort {
        ProductSort::Name => a.name.cmp(&b.name),
        ProductSort::Price => a.price.cmp(&b.price),
        ProductSort::CreatedAt => a.created_at.cmp(&b.created_at),
    };

    primary.then_with(|| a.uuid.cmp(&b.uuid))
}

#[async_trait]
impl ProductsRepository for MemoryProductsRepository {
    async fn list_products(
        &self,
        query: &ProductsQuery,
    ) -> Result<Page<ProductRecord>, RepositoryError> {
        let products = self.products.read().await;

        let mut matching: Vec<ProductRecord> = products
            .values()
            .filter(|record| matches(record, query))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort);

            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Ok(Page::from_sorted(matching, query.page))
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, RepositoryError> {
        Ok(self.products.read().await.get(&product).cloned())
    }

    async fn get_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, RepositoryError> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|record| products.contains(&record.uuid))
            .cloned()
            .collect())
    }

    async fn create_product(
        &self,
        product: &NewProduct,
        now: Timestamp,
    ) -> Result<ProductRecord, RepositoryError> {
        let mut products = self.products.write().await;

        if products.contains_key(&product.uuid) {
            return Err(RepositoryError::AlreadyExists);
        }

        let record = ProductRecord {
            uuid: product.uuid,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            images: product.images.clone(),
            stock: product.stock.unwrap_or(DEFAULT_STOCK),
            created_at: now,
            updated_at: now,
        };

        products.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: &ProductUpdate,
        now: Timestamp,
    ) -> Result<Option<ProductRecord>, RepositoryError> {
        let mut products = self.products.write().await;

        let Some(record) = products.get_mut(&product) else {
            return Ok(None);
        };

        if let Some(name) = &update.name {
            record.name.clone_from(name);
        }

        if let Some(description) = &update.description {
            record.description.clone_from(description);
        }

        if let Some(price) = update.price {
            record.price = price;
        }

        if let Some(category) = &update.category {
            record.category.clone_from(category);
        }

        if let Some(images) = &update.images {
            record.images.clone_from(images);
        }

        if let Some(stock) = update.stock {
            record.stock = stock;
        }

        record.updated_at = now;

        Ok(Some(record.clone()))
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<bool, RepositoryError> {
        Ok(self.products.write().await.remove(&product).is_some())
    }
}
