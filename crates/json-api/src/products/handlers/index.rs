//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    pagination::PageRequest,
    products::data::{ProductSort, ProductsQuery, SortDirection},
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The requested page of products
    pub products: Vec<ProductResponse>,

    /// Products matching the filter across all pages
    pub total: u64,

    pub page: u32,

    pub limit: u32,

    /// Number of pages at this limit
    pub pages: u64,
}

fn parse_sort(value: Option<&str>) -> Result<ProductSort, StatusError> {
    match value {
        None | Some("name") => Ok(ProductSort::Name),
        Some("price") => Ok(ProductSort::Price),
        Some("created_at") => Ok(ProductSort::CreatedAt),
        Some(other) => Err(StatusError::bad_request().brief(format!("unknown sort column: {other}"))),
    }
}

fn parse_direction(value: Option<&str>) -> Result<SortDirection, StatusError> {
    match value {
        None | Some("asc") => Ok(SortDirection::Asc),
        Some("desc") => Ok(SortDirection::Desc),
        Some(other) => {
            Err(StatusError::bad_request().brief(format!("unknown sort direction: {other}")))
        }
    }
}

/// Product Index Handler
///
/// Returns a filtered, sorted page of the catalog.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid query"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    search: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    direction: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = ProductsQuery {
        category: category.into_inner().filter(|value| !value.is_empty()),
        search: search.into_inner().filter(|value| !value.is_empty()),
        sort: parse_sort(sort.into_inner().as_deref())?,
        direction: parse_direction(direction.into_inner().as_deref())?,
        page: PageRequest::new(page.into_inner(), limit.into_inner())
            .or_400("invalid pagination")?,
    };

    let products = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        total: products.total,
        page: products.page,
        limit: products.limit,
        pages: products.pages,
        products: products.items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        errors::RepositoryError,
        pagination::Page,
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
    };

    use crate::test_helpers::products_service;

    use super::{super::tests::*, *};

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, None, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_uses_defaults() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| *query == ProductsQuery::default())
            .return_once(|query| Ok(Page::new(Vec::new(), 0, query.page)));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(response.products.is_empty());
        assert_eq!(response.page, 1);
        assert_eq!(response.limit, 10);
        assert_eq!(response.pages, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| {
                query.category.as_deref() == Some("accessories")
                    && query.search.as_deref() == Some("kente")
                    && query.sort == ProductSort::Price
                    && query.direction == SortDirection::Desc
                    && query.page.page() == 2
                    && query.page.limit() == 5
            })
            .return_once(move |query| {
                Ok(Page::new(
                    vec![make_product(uuid, Decimal::new(4500, 2))],
                    6,
                    query.page,
                ))
            });

        let response: ProductsResponse = TestClient::get(
            "http://example.com/products?category=accessories&search=kente&sort=price&direction=desc&page=2&limit=5",
        )
        .send(&make_service(products))
        .await
        .take_json()
        .await?;

        assert_eq!(response.total, 6);
        assert_eq!(response.pages, 2);
        assert_eq!(
            response.products.first().map(|product| product.uuid),
            Some(uuid.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_rejects_unknown_sort() {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?sort=colour")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_index_rejects_oversized_limit() {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?limit=101")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Storage(RepositoryError::Unavailable)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
