//! Order handlers (list, detail, status update, cancel)
//!
//! Every endpoint is scoped to the authenticated caller; another user's
//! order is indistinguishable from a missing one.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::auth::AuthenticatedUser;

use super::super::state::AppState;
use super::super::types::{
    ApiResponse, ApiResult, OrderActionData, OrderDetailView, OrderListView, UpdateStatusRequest,
    ok,
};

/// List the caller's orders, newest first
///
/// GET /api/v1/orders
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Caller's orders", body = OrderListView, content_type = "application/json"),
        (status = 401, description = "Authentication failed"),
        (status = 500, description = "Storage failure"),
        (status = 503, description = "Storage timed out")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<OrderListView> {
    let rows = state.orders.list_orders(user.user_id).await?;
    ok(OrderListView::from(rows))
}

/// One order with its line items
///
/// GET /api/v1/orders/{order_id}
#[utoipa::path(
    get,
    path = "/api/v1/orders/{order_id}",
    params(("order_id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order detail", body = OrderDetailView, content_type = "application/json"),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<OrderDetailView> {
    let Path(order_id) = path?;
    let detail = state.orders.get_order(user.user_id, order_id).await?;
    ok(OrderDetailView::from(detail))
}

/// Set an order's status
///
/// POST /api/v1/orders/{order_id}/status
#[utoipa::path(
    post,
    path = "/api/v1/orders/{order_id}/status",
    params(("order_id" = i64, Path, description = "Order ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderActionData, content_type = "application/json"),
        (status = 400, description = "Invalid order status, order id or body"),
        (status = 401, description = "Authentication failed"),
        (status = 409, description = "Order missing, not owned, or transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> ApiResult<OrderActionData> {
    let Path(order_id) = path?;
    let Json(req) = body?;
    let msg = state
        .orders
        .update_status(user.user_id, order_id, &req.new_status)
        .await?;
    Ok(Json(ApiResponse::success_with_msg(
        OrderActionData { order_id },
        msg,
    )))
}

/// Cancel a pending order
///
/// POST /api/v1/orders/{order_id}/cancel
#[utoipa::path(
    post,
    path = "/api/v1/orders/{order_id}/cancel",
    params(("order_id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = OrderActionData, content_type = "application/json"),
        (status = 401, description = "Authentication failed"),
        (status = 409, description = "Order is not pending, missing, or not owned")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn cancel_order(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<OrderActionData> {
    let Path(order_id) = path?;
    let msg = state.orders.cancel_order(user.user_id, order_id).await?;
    Ok(Json(ApiResponse::success_with_msg(
        OrderActionData { order_id },
        msg,
    )))
}
