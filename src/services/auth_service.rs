use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    audit,
    db::DbPool,
    dto::auth::{GoogleLoginRequest, LoginRequest, RegisterRequest, RegisterResponse},
    error::{AppError, AppResult},
    models::{Role, User},
    response::{MessageResponse, SUCCESS},
    services::user_service,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn register_user(
    pool: &DbPool,
    payload: RegisterRequest,
) -> AppResult<RegisterResponse> {
    let RegisterRequest {
        email,
        password,
        name,
        role,
    } = payload;
    let role = role.unwrap_or(Role::Buyer);
    if role == Role::Admin {
        return Err(AppError::BadRequest(
            "Admin accounts cannot be self-registered".into(),
        ));
    }

    let exist: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(email.as_str())
        .fetch_optional(pool)
        .await?;
    if exist.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&password)?;
    let id = Uuid::new_v4().to_string();
    let token = Uuid::new_v4().simple().to_string();

    let inserted = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, is_verified, verification_token)
        VALUES (?, ?, ?, ?, ?, 0, ?)
        "#,
    )
    .bind(&id)
    .bind(&name)
    .bind(email.as_str())
    .bind(password_hash)
    .bind(role.as_str())
    .bind(&token)
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => {}
        // lost a race with a concurrent registration for the same email
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        Err(err) => return Err(err.into()),
    }

    // No mail is sent; the token goes back to the caller instead.
    tracing::info!(user_id = %id, email = %email, "user registered, verification pending");
    audit::record(
        pool,
        Some(&id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(RegisterResponse {
        status: SUCCESS.to_string(),
        message: "Registration successful. Please verify your email.".to_string(),
        token,
    })
}

/// Unknown email, password-less account and wrong password all fail the same way.
pub async fn login_user(pool: &DbPool, payload: LoginRequest) -> AppResult<User> {
    let LoginRequest { email, password } = payload;
    let user = match user_service::find_by_email(pool, &email).await? {
        Some(u) => u,
        None => return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
    };

    let stored_hash = match user.password_hash.as_deref() {
        Some(hash) => hash,
        None => return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
    };
    if !verify_password(&password, stored_hash)? {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    audit::record(
        pool,
        Some(&user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(User::from(user))
}

/// Consume a verification token. A token works once.
pub async fn verify_email(pool: &DbPool, token: &str) -> AppResult<MessageResponse> {
    let user: Option<(String,)> =
        sqlx::query_as("SELECT id FROM users WHERE verification_token = ?")
            .bind(token)
            .fetch_optional(pool)
            .await?;
    let (user_id,) = match user {
        Some(u) => u,
        None => return Err(AppError::BadRequest("Invalid verification token".into())),
    };

    sqlx::query("UPDATE users SET is_verified = 1, verification_token = NULL WHERE id = ?")
        .bind(&user_id)
        .execute(pool)
        .await?;

    audit::record(
        pool,
        Some(&user_id),
        "email_verified",
        "users",
        serde_json::json!({ "user_id": user_id }),
    )
    .await;

    Ok(MessageResponse::success("Email verified successfully"))
}

/// Find-or-create by email. The provider token is accepted as-is: there is no
/// provider round trip, so this is a stand-in for real OAuth. Admin accounts
/// are never resolved this way.
pub async fn google_login(pool: &DbPool, payload: GoogleLoginRequest) -> AppResult<User> {
    let GoogleLoginRequest { email, name, .. } = payload;

    let user_id = match user_service::find_by_email(pool, &email).await? {
        Some(existing) => {
            // the provider token is never checked, so it cannot vouch for an admin
            if existing.role == Role::Admin.as_str() {
                tracing::warn!(user_id = %existing.id, "oauth login refused for admin account");
                return Err(AppError::Unauthorized(
                    "Admin accounts must sign in with a password".into(),
                ));
            }
            if !existing.is_verified {
                sqlx::query(
                    "UPDATE users SET is_verified = 1, verification_token = NULL WHERE id = ?",
                )
                .bind(&existing.id)
                .execute(pool)
                .await?;
            }
            existing.id
        }
        None => {
            let id = Uuid::new_v4().to_string();
            let name = if name.trim().is_empty() {
                email.split('@').next().unwrap_or_default().to_string()
            } else {
                name
            };
            sqlx::query(
                r#"
                INSERT INTO users (id, name, email, password_hash, role, is_verified)
                VALUES (?, ?, ?, NULL, ?, 1)
                "#,
            )
            .bind(&id)
            .bind(name)
            .bind(email.as_str())
            .bind(Role::Buyer.as_str())
            .execute(pool)
            .await?;
            tracing::info!(user_id = %id, email = %email, "user created from oauth login");
            id
        }
    };

    audit::record(
        pool,
        Some(&user_id),
        "oauth_login",
        "users",
        serde_json::json!({ "user_id": user_id, "provider": "google" }),
    )
    .await;

    user_service::get_profile(pool, &user_id).await
}
