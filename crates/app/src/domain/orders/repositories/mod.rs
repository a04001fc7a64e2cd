//! Orders Repositories

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::domain::{
    errors::RepositoryError,
    orders::{
        data::{OrderStatusUpdate, OrdersQuery},
        records::{OrderRecord, OrderStatusChange, OrderUuid},
    },
    pagination::Page,
};

mod memory;
mod postgres;

pub use memory::MemoryOrdersRepository;
pub use postgres::PgOrdersRepository;

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Persist an order and all of its items, or nothing at all.
    async fn create_order(&self, order: &OrderRecord) -> Result<OrderRecord, RepositoryError>;

    async fn get_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, RepositoryError>;

    /// Apply `update`, returning the previous status alongside the new record.
    ///
    /// Returns `None` if the order does not exist.
    async fn update_order(
        &self,
        order: OrderUuid,
        update: &OrderStatusUpdate,
        now: Timestamp,
    ) -> Result<Option<OrderStatusChange>, RepositoryError>;

    /// Newest first by creation time.
    async fn list_orders(&self, query: &OrdersQuery) -> Result<Page<OrderRecord>, RepositoryError>;
}
