//! PostgreSQL products repository.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        errors::RepositoryError,
        pagination::Page,
        products::{
            data::{
                DEFAULT_STOCK, NewProduct, ProductSort, ProductUpdate, ProductsQuery, SortDirection,
            },
            records::{ProductRecord, ProductUuid},
        },
    },
};

use super::ProductsRepository;

const LIST_PRODUCTS_SQL: &str = include_str!("../sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("../sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("../sql/get_product.sql");
const GET_PRODUCTS_SQL: &str = include_str!("../sql/get_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("../sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("../sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("../sql/delete_product.sql");

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

fn order_by(sort: ProductSort, direction: SortDirection) -> String {
    let column = match sort {
        ProductSort::Name => "name",
        ProductSort::Price => "price",
        ProductSort::CreatedAt => "created_at",
    };

    let direction = match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };

    format!("{column} {direction}, uuid {direction}")
}

/// `ILIKE` pattern matching `search` anywhere, with wildcards escaped.
fn search_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}

fn to_i32(value: u32, column: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn to_i64(value: u64, column: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn list_products(
        &self,
        products_query: &ProductsQuery,
    ) -> Result<Page<ProductRecord>, RepositoryError> {
        let search = products_query.search.as_deref().map(search_pattern);
        let sql = LIST_PRODUCTS_SQL.replace(
            "{order_by}",
            &order_by(products_query.sort, products_query.direction),
        );

        let limit = i64::from(products_query.page.limit());
        let offset = to_i64(products_query.page.offset(), "offset")?;

        let mut tx = self.db.begin().await?;

        let total: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(products_query.category.as_deref())
            .bind(search.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        let products = query_as::<Postgres, ProductRecord>(&sql)
            .bind(products_query.category.as_deref())
            .bind(search.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Page::new(
            products,
            u64::try_from(total).unwrap_or_default(),
            products_query.page,
        ))
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, RepositoryError> {
        Ok(query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(self.db.pool())
            .await?)
    }

    async fn get_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, RepositoryError> {
        let uuids: Vec<Uuid> = products.iter().map(|uuid| uuid.into_uuid()).collect();

        Ok(query_as::<Postgres, ProductRecord>(GET_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(self.db.pool())
            .await?)
    }

    async fn create_product(
        &self,
        product: &NewProduct,
        now: Timestamp,
    ) -> Result<ProductRecord, RepositoryError> {
        let stock = to_i32(product.stock.unwrap_or(DEFAULT_STOCK), "stock")?;

        Ok(query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name.as_str())
            .bind(product.description.as_str())
            .bind(product.price)
            .bind(product.category.as_str())
            .bind(product.images.as_slice())
            .bind(stock)
            .bind(SqlxTimestamp::from(now))
            .fetch_one(self.db.pool())
            .await?)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: &ProductUpdate,
        now: Timestamp,
    ) -> Result<Option<ProductRecord>, RepositoryError> {
        let stock = update
            .stock
            .map(|stock| to_i32(stock, "stock"))
            .transpose()?;

        Ok(query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.price)
            .bind(update.category.as_deref())
            .bind(update.images.as_deref())
            .bind(stock)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(self.db.pool())
            .await?)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<bool, RepositoryError> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let stock: i32 = row.try_get("stock")?;

        let stock = u32::try_from(stock).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
            images: row.try_get("images")?,
            stock,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
