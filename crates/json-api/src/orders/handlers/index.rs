//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::{data::OrdersFilter, status::OrderStatus};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The requested page, newest first
    pub orders: Vec<OrderResponse>,

    pub total: u64,

    pub page: u32,

    pub limit: u32,

    pub pages: u64,
}

/// Order Index Handler
///
/// Administrators see every order; customers see their own.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid query"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let status = status
        .into_inner()
        .map(|value| value.parse::<OrderStatus>())
        .transpose()
        .or_400("invalid status filter")?;

    let orders = state
        .app
        .orders
        .list_orders(
            &session,
            OrdersFilter {
                status,
                page: page.into_inner(),
                limit: limit.into_inner(),
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        total: orders.total,
        page: orders.page,
        limit: orders.limit,
        pages: orders.pages,
        orders: orders.items.into_iter().map(Into::into).collect(),
    }))
}
