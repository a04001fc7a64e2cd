//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, MemoryAuthService, PgAuthService},
    database::{self, Db},
    domain::{
        orders::{
            OrderLifecycle, OrdersService,
            repositories::{MemoryOrdersRepository, PgOrdersRepository},
        },
        products::{
            CatalogService, ProductsService,
            repositories::{MemoryProductsRepository, PgProductsRepository},
        },
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migration(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(url: &str, run_migrations: bool) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migration)?;

            info!("database migrations applied");
        }

        let db = Db::new(pool.clone());
        let products = Arc::new(PgProductsRepository::new(db.clone()));

        Ok(Self {
            products: Arc::new(CatalogService::new(products.clone())),
            orders: Arc::new(OrderLifecycle::new(
                Arc::new(PgOrdersRepository::new(db)),
                products,
            )),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }

    /// Build application context over process memory. Nothing survives a restart.
    #[must_use]
    pub fn in_memory(auth: MemoryAuthService) -> Self {
        let products = Arc::new(MemoryProductsRepository::new());

        Self {
            products: Arc::new(CatalogService::new(products.clone())),
            orders: Arc::new(OrderLifecycle::new(
                Arc::new(MemoryOrdersRepository::new()),
                products,
            )),
            auth: Arc::new(auth),
        }
    }
}
