//! In-memory orders repository.

use std::{cmp::Reverse, collections::HashMap, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::{
    errors::RepositoryError,
    orders::{
        data::{OrderStatusUpdate, OrdersQuery},
        records::{OrderRecord, OrderStatusChange, OrderUuid},
    },
    pagination::Page,
};

use super::OrdersRepository;

#[derive(Debug, Default)]
struct Orders {
    records: HashMap<OrderUuid, (u64, OrderRecord)>,
    next_sequence: u64,
}

/// Orders kept in process memory.
///
/// Orders created within the same instant are ordered by insertion.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrdersRepository {
    orders: Arc<RwLock<Orders>>,
}

impl MemoryOrdersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrdersRepository for MemoryOrdersRepository {
    async fn create_order(&self, order: &OrderRecord) -> Result<OrderRecord, RepositoryError> {
        let mut orders = self.orders.write().await;

        if orders.records.contains_key(&order.uuid) {
            return Err(RepositoryError::AlreadyExists);
        }

        let sequence = orders.next_sequence;

        orders.next_sequence += 1;
        orders.records.insert(order.uuid, (sequence, order.clone()));

        Ok(order.clone())
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, RepositoryError> {
        Ok(self
            .orders
            .read()
            .await
            .records
            .get(&order)
            .map(|(_, record)| record.clone()))
    }

    async fn update_order(
        &self,
        order: OrderUuid,
        update: &OrderStatusUpdate,
        now: Timestamp,
    ) -> Result<Option<OrderStatusChange>, RepositoryError> {
        let mut orders = self.orders.write().await;

        let Some((_, record)) = orders.records.get_mut(&order) else {
            return Ok(None);
        };

        let previous = record.status;

        record.status = update.status;
        record.updated_at = now;

        if let Some(tracking_number) = &update.tracking_number {
            record.tracking_number = Some(tracking_number.clone());
        }

        if let Some(payment_status) = update.payment_status {
            record.payment_status = payment_status;
        }

        Ok(Some(OrderStatusChange {
            previous,
            order: record.clone(),
        }))
    }

    async fn list_orders(&self, query: &OrdersQuery) -> Result<Page<OrderRecord>, RepositoryError> {
        let orders = self.orders.read().await;

        let mut matching: Vec<&(u64, OrderRecord)> = orders
            .records
            .values()
            .filter(|(_, record)| query.user.is_none_or(|user| record.user == user))
            .filter(|(_, record)| query.status.is_none_or(|status| record.status == status))
            .collect();

        matching.sort_by_key(|(sequence, record)| Reverse((record.created_at, *sequence)));

        let sorted = matching
            .into_iter()
            .map(|(_, record)| record.clone())
            .collect();

        Ok(Page::from_sorted(sorted, query.page))
    }
}
