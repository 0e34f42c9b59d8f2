use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};

use crate::{
    dto::orders::{CheckoutRequest, CheckoutResponse, UpdateOrderStatusRequest},
    error::AppResult,
    extractors::ValidatedJson,
    models::Order,
    response::StatusResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        // the segment after /orders shares one parameter name across both routes
        .route("/orders/{id}", get(list_orders))
        .route("/orders/{id}/status", patch(update_order_status))
}

#[utoipa::path(
    post,
    path = "/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed from the cart", body = CheckoutResponse),
        (status = 400, description = "Cart is empty"),
    ),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let resp = order_service::checkout(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The user's orders, newest first", body = Vec<Order>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order_service::list_orders(&state, &user_id).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = StatusResponse),
        (status = 400, description = "Invalid status or transition"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderStatusRequest>,
) -> AppResult<Json<StatusResponse>> {
    let resp = order_service::update_order_status(&state, &id, payload).await?;
    Ok(Json(resp))
}
