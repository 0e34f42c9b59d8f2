use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::users::UpdateProfileRequest,
    error::AppResult,
    extractors::ValidatedJson,
    models::User,
    response::StatusResponse,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/user/{id}", get(get_profile).post(update_profile))
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = user_service::get_profile(&state.pool, &id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/user/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = StatusResponse),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<StatusResponse>> {
    let resp = user_service::update_profile(&state.pool, &id, payload).await?;
    Ok(Json(resp))
}
