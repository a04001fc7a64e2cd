//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    auth::{MockAuthService, Session, UserUuid},
    context::AppContext,
    domain::{orders::MockOrdersService, products::MockProductsService},
};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const CUSTOMER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));

pub(crate) fn admin() -> Session {
    Session::admin(ADMIN_UUID)
}

pub(crate) fn customer() -> Session {
    Session::customer(CUSTOMER_UUID)
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_get_order().never();
    orders.expect_update_order_status().never();
    orders.expect_list_orders().never();

    orders
}

fn state(
    products: MockProductsService,
    orders: MockOrdersService,
    auth: MockAuthService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        orders: Arc::new(orders),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_products_mock(), strict_orders_mock(), auth)
}

/// Stand-in for the auth middleware: places `session` in the depot.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WithSession(pub(crate) Session);

#[async_trait]
impl Handler for WithSession {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_session(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

fn service(state: Arc<State>, session: Option<Session>, route: Router) -> Service {
    let router = Router::new().hoop(inject(state));

    let router = match session {
        Some(session) => router.hoop(WithSession(session)),
        None => router,
    };

    Service::new(router.push(route))
}

pub(crate) fn products_service(
    products: MockProductsService,
    session: Option<Session>,
    route: Router,
) -> Service {
    service(
        state(products, strict_orders_mock(), strict_auth_mock()),
        session,
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, session: Session, route: Router) -> Service {
    service(
        state(strict_products_mock(), orders, strict_auth_mock()),
        Some(session),
        route,
    )
}

/// The full application router over the given mocks, with no session injected.
pub(crate) fn app_service(
    products: MockProductsService,
    orders: MockOrdersService,
    auth: MockAuthService,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(products, orders, auth)))
            .push(crate::router::app_router()),
    )
}
