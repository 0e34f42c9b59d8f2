use sqlx::{QueryBuilder, Sqlite};

use crate::{
    audit,
    db::DbPool,
    dto::users::UpdateProfileRequest,
    error::{AppError, AppResult},
    models::{User, UserRow},
    response::StatusResponse,
};

pub const USER_COLUMNS: &str = "id, name, email, password_hash, role, address, card_number, \
     card_expiry, card_cvv, is_verified, verification_token";

pub async fn find_by_id(pool: &DbPool, id: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<UserRow>> {
    let row =
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

pub async fn get_profile(pool: &DbPool, id: &str) -> AppResult<User> {
    match find_by_id(pool, id).await? {
        Some(row) => Ok(User::from(row)),
        None => Err(AppError::NotFound(format!("User {id}"))),
    }
}

/// Write only the profile fields present in the payload. The user must exist.
pub async fn update_profile(
    pool: &DbPool,
    id: &str,
    payload: UpdateProfileRequest,
) -> AppResult<StatusResponse> {
    if payload.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET ");
    let mut fields = qb.separated(", ");
    if let Some(name) = payload.name {
        fields.push("name = ").push_bind_unseparated(name);
    }
    if let Some(address) = payload.address {
        fields.push("address = ").push_bind_unseparated(address);
    }
    if let Some(card_number) = payload.card_number {
        fields.push("card_number = ").push_bind_unseparated(card_number);
    }
    if let Some(card_expiry) = payload.card_expiry {
        fields.push("card_expiry = ").push_bind_unseparated(card_expiry);
    }
    if let Some(card_cvv) = payload.card_cvv {
        fields.push("card_cvv = ").push_bind_unseparated(card_cvv);
    }
    qb.push(" WHERE id = ").push_bind(id);

    let result = qb.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User {id}")));
    }

    audit::record(
        pool,
        Some(id),
        "profile_update",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(StatusResponse::success())
}
