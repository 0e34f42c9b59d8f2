use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::auth::{GoogleLoginRequest, LoginRequest, RegisterRequest, RegisterResponse},
    error::AppResult,
    extractors::ValidatedJson,
    models::User,
    response::MessageResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify-email/{token}", get(verify_email))
        .route("/auth/google", post(google_login))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered, verification pending", body = RegisterResponse),
        (status = 400, description = "Invalid input or email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    let resp = auth_service::register_user(&state.pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = User),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<User>> {
    let user = auth_service::login_user(&state.pool, payload).await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/verify-email/{token}",
    params(
        ("token" = String, Path, description = "Verification token")
    ),
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 400, description = "Invalid verification token")
    ),
    tag = "Auth"
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let resp = auth_service::verify_email(&state.pool, &token).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/auth/google",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Logged in, account created on first use", body = User),
        (status = 400, description = "Invalid input")
    ),
    tag = "Auth"
)]
pub async fn google_login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GoogleLoginRequest>,
) -> AppResult<Json<User>> {
    let user = auth_service::google_login(&state.pool, payload).await?;
    Ok(Json(user))
}
