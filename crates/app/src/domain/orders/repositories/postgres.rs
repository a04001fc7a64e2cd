//! PostgreSQL orders repository.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::{
        errors::RepositoryError,
        orders::{
            data::{OrderStatusUpdate, OrdersQuery, ShippingAddress},
            records::{OrderItemRecord, OrderRecord, OrderStatusChange, OrderUuid},
            status::{OrderStatus, PaymentStatus},
        },
        pagination::Page,
        products::records::ProductUuid,
    },
};

use super::OrdersRepository;

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");
const UPDATE_ORDER_SQL: &str = include_str!("../sql/update_order.sql");

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    db: Db,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

/// Order row without its items.
struct OrderRow(OrderRecord);

struct OrderItemRow {
    order: Uuid,
    item: OrderItemRecord,
}

/// Update result row carrying the status before the update.
struct OrderChangeRow {
    previous: OrderStatus,
    order: OrderRecord,
}

fn decode_error(column: &str, source: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

fn decode_status<T: std::str::FromStr>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|e| decode_error(column, e))
}

async fn load_items(
    conn: &mut PgConnection,
    orders: &[Uuid],
) -> Result<HashMap<Uuid, Vec<OrderItemRecord>>, sqlx::Error> {
    let rows = query_as::<Postgres, OrderItemRow>(LIST_ORDER_ITEMS_SQL)
        .bind(orders)
        .fetch_all(conn)
        .await?;

    let mut items: HashMap<Uuid, Vec<OrderItemRecord>> = HashMap::new();

    for row in rows {
        items.entry(row.order).or_default().push(row.item);
    }

    Ok(items)
}

fn attach_items(mut order: OrderRecord, items: &mut HashMap<Uuid, Vec<OrderItemRecord>>) -> OrderRecord {
    order.items = items.remove(&order.uuid.into_uuid()).unwrap_or_default();

    order
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create_order(&self, order: &OrderRecord) -> Result<OrderRecord, RepositoryError> {
        let mut tx = self.db.begin().await?;
        let address = &order.shipping_address;

        query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user.into_uuid())
            .bind(order.total_amount)
            .bind(address.first_name.as_str())
            .bind(address.last_name.as_str())
            .bind(address.street.as_str())
            .bind(address.city.as_str())
            .bind(address.state.as_str())
            .bind(address.zip_code.as_str())
            .bind(address.country.as_str())
            .bind(order.payment_method.as_str())
            .bind(order.payment_status.as_str())
            .bind(order.status.as_str())
            .bind(order.tracking_number.as_deref())
            .bind(SqlxTimestamp::from(order.created_at))
            .bind(SqlxTimestamp::from(order.updated_at))
            .execute(&mut *tx)
            .await?;

        for (position, item) in order.items.iter().enumerate() {
            let position = i32::try_from(position).map_err(|e| decode_error("position", e))?;
            let quantity = i32::try_from(item.quantity).map_err(|e| decode_error("quantity", e))?;

            query(CREATE_ORDER_ITEM_SQL)
                .bind(order.uuid.into_uuid())
                .bind(position)
                .bind(item.product.into_uuid())
                .bind(quantity)
                .bind(item.price_at_purchase)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(order.clone())
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, RepositoryError> {
        let mut tx = self.db.begin().await?;

        let Some(OrderRow(record)) = query_as::<Postgres, OrderRow>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut items = load_items(&mut *tx, &[order.into_uuid()]).await?;

        tx.commit().await?;

        Ok(Some(attach_items(record, &mut items)))
    }

    async fn update_order(
        &self,
        order: OrderUuid,
        update: &OrderStatusUpdate,
        now: Timestamp,
    ) -> Result<Option<OrderStatusChange>, RepositoryError> {
        let mut tx = self.db.begin().await?;

        let Some(change) = query_as::<Postgres, OrderChangeRow>(UPDATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(update.status.as_str())
            .bind(update.tracking_number.as_deref())
            .bind(update.payment_status.map(PaymentStatus::as_str))
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut items = load_items(&mut *tx, &[order.into_uuid()]).await?;

        tx.commit().await?;

        Ok(Some(OrderStatusChange {
            previous: change.previous,
            order: attach_items(change.order, &mut items),
        }))
    }

    async fn list_orders(
        &self,
        orders_query: &OrdersQuery,
    ) -> Result<Page<OrderRecord>, RepositoryError> {
        let user = orders_query.user.map(UserUuid::into_uuid);
        let status = orders_query.status.map(OrderStatus::as_str);
        let limit = i64::from(orders_query.page.limit());
        let offset =
            i64::try_from(orders_query.page.offset()).map_err(|e| decode_error("offset", e))?;

        let mut tx = self.db.begin().await?;

        let total: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(user)
            .bind(status)
            .fetch_one(&mut *tx)
            .await?;

        let rows = query_as::<Postgres, OrderRow>(LIST_ORDERS_SQL)
            .bind(user)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;

        let uuids: Vec<Uuid> = rows.iter().map(|row| row.0.uuid.into_uuid()).collect();
        let mut items = load_items(&mut *tx, &uuids).await?;

        tx.commit().await?;

        let records = rows
            .into_iter()
            .map(|OrderRow(record)| attach_items(record, &mut items))
            .collect();

        Ok(Page::new(
            records,
            u64::try_from(total).unwrap_or_default(),
            orders_query.page,
        ))
    }
}

fn decode_order(row: &PgRow) -> sqlx::Result<OrderRecord> {
    Ok(OrderRecord {
        uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
        user: UserUuid::from_uuid(row.try_get("user_uuid")?),
        items: Vec::new(),
        total_amount: row.try_get::<Decimal, _>("total_amount")?,
        shipping_address: ShippingAddress {
            first_name: row.try_get("shipping_first_name")?,
            last_name: row.try_get("shipping_last_name")?,
            street: row.try_get("shipping_street")?,
            city: row.try_get("shipping_city")?,
            state: row.try_get("shipping_state")?,
            zip_code: row.try_get("shipping_zip_code")?,
            country: row.try_get("shipping_country")?,
        },
        payment_method: row.try_get("payment_method")?,
        payment_status: decode_status(row, "payment_status")?,
        status: decode_status(row, "status")?,
        tracking_number: row.try_get("tracking_number")?,
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        decode_order(row).map(Self)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderChangeRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            previous: decode_status(row, "previous_status")?,
            order: decode_order(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;

        Ok(Self {
            order: row.try_get("order_uuid")?,
            item: OrderItemRecord {
                product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                quantity: u32::try_from(quantity).map_err(|e| decode_error("quantity", e))?,
                price_at_purchase: row.try_get("price_at_purchase")?,
            },
        })
    }
}
