use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::reviews::CreateReviewRequest,
    error::AppResult,
    extractors::ValidatedJson,
    models::Review,
    response::StatusResponse,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/reviews/{product_id}", get(list_reviews).post(create_review))
}

#[utoipa::path(
    get,
    path = "/reviews/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Reviews, newest first", body = Vec<Review>)
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = review_service::list_reviews(&state.pool, &product_id).await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    post,
    path = "/reviews/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review stored", body = StatusResponse),
        (status = 400, description = "Invalid review"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> AppResult<Json<StatusResponse>> {
    let resp = review_service::create_review(&state.pool, &product_id, payload).await?;
    Ok(Json(resp))
}
