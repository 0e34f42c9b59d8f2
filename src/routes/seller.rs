use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::analytics::SellerAnalytics,
    error::AppResult,
    models::Order,
    services::{analytics_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/seller/analytics", get(analytics))
        .route("/seller/orders/{seller_id}", get(seller_orders))
}

#[utoipa::path(
    get,
    path = "/seller/orders/{seller_id}",
    params(
        ("seller_id" = String, Path, description = "Seller ID")
    ),
    responses(
        (status = 200, description = "Orders containing the seller's products, narrowed to those lines", body = Vec<Order>)
    ),
    tag = "Seller"
)]
pub async fn seller_orders(
    State(state): State<AppState>,
    Path(seller_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order_service::list_seller_orders(&state, &seller_id).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/seller/analytics",
    responses(
        (status = 200, description = "Revenue and sales summary", body = SellerAnalytics)
    ),
    tag = "Seller"
)]
pub async fn analytics(State(state): State<AppState>) -> AppResult<Json<SellerAnalytics>> {
    let stats = analytics_service::seller_analytics(&state).await?;
    Ok(Json(stats))
}
