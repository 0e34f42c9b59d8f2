use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::cart::{AddToCartRequest, CartEntry},
    error::AppResult,
    extractors::ValidatedJson,
    response::StatusResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", post(add_to_cart))
        .route("/cart/{user_id}", get(get_cart).delete(clear_cart))
}

#[utoipa::path(
    get,
    path = "/cart/{user_id}",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Cart lines with their products", body = Vec<CartEntry>)
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<CartEntry>>> {
    let items = cart_service::get_cart(&state.pool, &user_id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Cart line added or quantity replaced", body = StatusResponse),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddToCartRequest>,
) -> AppResult<Json<StatusResponse>> {
    let resp = cart_service::add_to_cart(&state.pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/cart/{user_id}",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Cart cleared", body = StatusResponse),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let resp = cart_service::clear_cart(&state.pool, &user_id).await?;
    Ok(Json(resp))
}
