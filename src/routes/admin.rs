use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/users", get(list_users))
}

#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "All users (admin only)", body = Vec<User>),
        (status = 401, description = "Missing or unknown caller"),
        (status = 403, description = "Forbidden"),
    ),
    security(("user_id" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<User>>> {
    let users = admin_service::list_users(&state, &user).await?;
    Ok(Json(users))
}
