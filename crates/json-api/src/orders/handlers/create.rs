//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::data::{NewOrder, NewOrderItem};

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, ShippingAddressBody},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
}

/// Create Order Request
///
/// Prices are taken from the catalog; any total sent by the client is ignored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub shipping_address: ShippingAddressBody,
    pub payment_method: String,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            items: request
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product: item.product_uuid.into(),
                    quantity: item.quantity,
                })
                .collect(),
            shipping_address: request.shipping_address.into(),
            payment_method: request.payment_method,
        }
    }
}

/// Create Order Handler
///
/// Places an order for the authenticated user.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown product"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let order = state
        .app
        .orders
        .create_order(&session, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        orders::{
            MockOrdersService, OrderValidationError, OrdersServiceError,
            records::OrderUuid,
            status::OrderStatus,
        },
        products::records::ProductUuid,
    };

    use crate::test_helpers::{CUSTOMER_UUID, customer, orders_service};

    use super::{super::tests::*, *};

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, customer(), Router::with_path("orders").post(handler))
    }

    fn body(product: ProductUuid, quantity: u32) -> serde_json::Value {
        json!({
            "items": [{ "product_uuid": product.into_uuid(), "quantity": quantity }],
            "shipping_address": {
                "first_name": "Efua",
                "last_name": "Owusu",
                "street": "7 Ring Rd",
                "city": "Kumasi",
                "state": "Ashanti",
                "zip_code": "00233",
                "country": "GH"
            },
            "payment_method": "card",
            "total": 0.01
        })
    }

    #[tokio::test]
    async fn test_create_order_returns_201_with_server_total() -> TestResult {
        let product = ProductUuid::new();
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(move |session, order| {
                session.user == CUSTOMER_UUID
                    && order.items.len() == 1
                    && order.items.first().map(|item| (item.product, item.quantity))
                        == Some((product, 2))
                    && order.shipping_address.city == "Kumasi"
            })
            .return_once(move |session, _| {
                Ok(make_order(uuid, session.user, OrderStatus::Pending))
            });

        let mut res = TestClient::post("http://example.com/orders")
            .json(&body(product, 2))
            .send(&make_service(orders))
            .await;

        let response: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{uuid}").as_str()));
        assert_eq!(response.status, "pending");
        assert_eq!(response.payment_status, "pending");
        assert_eq!(response.total_amount, Decimal::new(5000, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_validation_error_returns_400() {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().once().return_once(|_, _| {
            Err(OrdersServiceError::Validation(OrderValidationError::NoItems))
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&body(ProductUuid::new(), 0))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_order_unknown_product_returns_404() {
        let product = ProductUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(move |_, _| Err(OrdersServiceError::ProductNotFound(product)));

        let res = TestClient::post("http://example.com/orders")
            .json(&body(product, 1))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
