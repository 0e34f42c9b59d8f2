use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, models::Role, state::AppState};

/// Header carrying the caller's user id. Login hands out no session token,
/// so the id returned by `/login` is the caller's identity.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub role: String,
}

pub fn ensure_role(user: &AuthUser, role: Role) -> Result<(), AppError> {
    if user.role != role.as_str() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Admin)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing X-User-Id header".into()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid X-User-Id header".into()))?
            .trim()
            .to_string();

        let row: Option<(String,)> = sqlx::query_as("SELECT role FROM users WHERE id = ?")
            .bind(&user_id)
            .fetch_optional(&state.pool)
            .await?;

        match row {
            Some((role,)) => Ok(AuthUser { user_id, role }),
            None => Err(AppError::Unauthorized("Unknown user".into())),
        }
    }
}
