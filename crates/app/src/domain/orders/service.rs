//! Orders service.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use storefront::pricing::total_price;
use tracing::{info, instrument, warn};

use crate::{
    auth::Session,
    domain::{
        orders::{
            data::{NewOrder, OrderStatusUpdate, OrdersFilter, OrdersQuery},
            errors::{OrderValidationError, OrdersServiceError},
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            repositories::OrdersRepository,
            status::{OrderStatus, PaymentStatus},
        },
        pagination::{Page, PageRequest},
        products::{records::ProductUuid, repositories::ProductsRepository},
    },
};

/// Order lifecycle over an orders store, priced from the catalog.
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: Arc<dyn OrdersRepository>,
    products: Arc<dyn ProductsRepository>,
}

impl OrderLifecycle {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersRepository>, products: Arc<dyn ProductsRepository>) -> Self {
        Self { orders, products }
    }

    /// Price every item from the current catalog.
    async fn price_items(
        &self,
        order: &NewOrder,
    ) -> Result<Vec<OrderItemRecord>, OrdersServiceError> {
        let uuids: Vec<ProductUuid> = order.items.iter().map(|item| item.product).collect();

        let prices: HashMap<ProductUuid, _> = self
            .products
            .get_products(&uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product.price))
            .collect();

        order
            .items
            .iter()
            .map(|item| {
                let price = prices
                    .get(&item.product)
                    .copied()
                    .ok_or(OrdersServiceError::ProductNotFound(item.product))?;

                Ok(OrderItemRecord {
                    product: item.product,
                    quantity: item.quantity,
                    price_at_purchase: price,
                })
            })
            .collect()
    }
}

#[async_trait]
impl OrdersService for OrderLifecycle {
    #[instrument(skip(self, session, order), fields(user_uuid = %session.user))]
    async fn create_order(
        &self,
        session: &Session,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        order.validate()?;

        let items = self.price_items(&order).await?;
        let total_amount = total_price(
            items
                .iter()
                .map(|item| (item.price_at_purchase, item.quantity)),
        );
        let now = Timestamp::now();

        let created = self
            .orders
            .create_order(&OrderRecord {
                uuid: OrderUuid::new(),
                user: session.user,
                items,
                total_amount,
                shipping_address: order.shipping_address,
                payment_method: order.payment_method,
                payment_status: PaymentStatus::Pending,
                status: OrderStatus::Pending,
                tracking_number: None,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(order_uuid = %created.uuid, total_amount = %created.total_amount, "order created");

        Ok(created)
    }

    async fn get_order(
        &self,
        session: &Session,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let record = self
            .orders
            .get_order(order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if !session.can_access(record.user) {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(record)
    }

    #[instrument(skip(self, session, update), fields(user_uuid = %session.user, order_uuid = %order, status = %update.status))]
    async fn update_order_status(
        &self,
        session: &Session,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if !session.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let change = self
            .orders
            .update_order(order, &update, Timestamp::now())
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if change.previous != update.status && !change.previous.can_transition_to(update.status) {
            warn!(
                previous = %change.previous,
                next = %update.status,
                "order moved outside the canonical lifecycle"
            );
        }

        info!(previous = %change.previous, "order status updated");

        Ok(change.order)
    }

    async fn list_orders(
        &self,
        session: &Session,
        filter: OrdersFilter,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let page = PageRequest::new(filter.page, filter.limit).map_err(OrderValidationError::from)?;

        let query = OrdersQuery {
            user: (!session.is_admin()).then_some(session.user),
            status: filter.status,
            page,
        };

        Ok(self.orders.list_orders(&query).await?)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order for the session's user, priced from the catalog.
    async fn create_order(
        &self,
        session: &Session,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order. Only its owner and administrators may read it.
    async fn get_order(
        &self,
        session: &Session,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Set an order's status. Administrators only; any status may be set.
    async fn update_order_status(
        &self,
        session: &Session,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Newest first. Non-administrators only see their own orders.
    async fn list_orders(
        &self,
        session: &Session,
        filter: OrdersFilter,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;
}
