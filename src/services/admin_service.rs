use crate::{
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::{User, UserRow},
    services::user_service::USER_COLUMNS,
    state::AppState,
};

pub async fn list_users(state: &AppState, user: &AuthUser) -> AppResult<Vec<User>> {
    ensure_admin(user)?;
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY rowid"
    ))
    .fetch_all(&state.pool)
    .await?;

    Ok(rows.into_iter().map(User::from).collect())
}
