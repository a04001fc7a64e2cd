//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    data::OrderStatusUpdate,
    status::{OrderStatus, PaymentStatus},
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// pending, processing, shipped, delivered or cancelled
    pub status: String,

    pub tracking_number: Option<String>,

    /// pending, paid or failed
    pub payment_status: Option<String>,
}

impl TryFrom<UpdateOrderStatusRequest> for OrderStatusUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateOrderStatusRequest) -> Result<Self, Self::Error> {
        Ok(OrderStatusUpdate {
            status: request
                .status
                .parse::<OrderStatus>()
                .or_400("invalid status")?,
            tracking_number: request.tracking_number,
            payment_status: request
                .payment_status
                .map(|value| value.parse::<PaymentStatus>())
                .transpose()
                .or_400("invalid payment status")?,
        })
    }
}

/// Update Order Status Handler
///
/// Administrators only. Any status may be set.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        status = tracing::field::Empty,
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;
    let order = order.into_inner();
    let update = OrderStatusUpdate::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(session.user));
    span.record("order_uuid", tracing::field::display(order));
    span.record("status", tracing::field::display(update.status));

    let updated = state
        .app
        .orders
        .update_order_status(&session, order.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        auth::Session,
        domain::orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
    };

    use crate::test_helpers::{admin, customer, orders_service};

    use super::{super::tests::*, *};

    fn make_service(orders: MockOrdersService, session: Session) -> Service {
        orders_service(
            orders,
            session,
            Router::with_path("orders/{order}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_order_status_as_admin() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .withf(move |session, order, update| {
                session.is_admin()
                    && *order == uuid
                    && *update
                        == OrderStatusUpdate {
                            status: OrderStatus::Shipped,
                            tracking_number: Some("GH42".to_string()),
                            payment_status: Some(PaymentStatus::Paid),
                        }
            })
            .return_once(|session, order, update| {
                let mut record = make_order(order, session.user, update.status);

                record.tracking_number = update.tracking_number;
                record.payment_status = PaymentStatus::Paid;

                Ok(record)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}"))
            .json(&json!({
                "status": "shipped",
                "tracking_number": "GH42",
                "payment_status": "paid"
            }))
            .send(&make_service(orders, admin()))
            .await;

        let response: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(response.status, "shipped");
        assert_eq!(response.tracking_number.as_deref(), Some("GH42"));
        assert_eq!(response.payment_status, "paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_status_as_customer_returns_403() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        let res = TestClient::put(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .json(&json!({ "status": "delivered" }))
            .send(&make_service(orders, customer()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_update_order_unknown_status_returns_400() {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order_status().never();

        let res = TestClient::put(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .json(&json!({ "status": "teleported" }))
            .send(&make_service(orders, admin()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
