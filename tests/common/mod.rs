#![allow(dead_code)]

use std::path::PathBuf;

use marketplace_api::{
    config::AppConfig,
    db,
    dto::{auth::RegisterRequest, cart::AddToCartRequest},
    models::Role,
    services::{auth_service, cart_service},
    state::AppState,
};

pub fn test_config() -> AppConfig {
    AppConfig::for_database("sqlite::memory:")
}

/// Fresh in-memory database, migrated and seeded through the startup path.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let config = test_config();
    let state = db::connect(&config).await?;
    db::init(&state, &config).await?;
    Ok(state)
}

/// File-backed database with a real multi-connection pool, for tests that
/// need concurrent writers. Call `remove_file_db` when done.
pub async fn setup_file_state(max_connections: u32) -> anyhow::Result<(AppState, PathBuf)> {
    let path = std::env::temp_dir().join(format!("marketplace-{}.db", uuid::Uuid::new_v4()));
    let config = AppConfig {
        max_connections,
        ..AppConfig::for_database(format!("sqlite://{}", path.display()))
    };
    let state = db::connect(&config).await?;
    db::init(&state, &config).await?;
    Ok((state, path))
}

pub async fn remove_file_db(state: AppState, path: PathBuf) {
    state.pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

pub async fn add(state: &AppState, user_id: &str, product_id: &str, quantity: i32) -> anyhow::Result<()> {
    cart_service::add_to_cart(
        &state.pool,
        AddToCartRequest {
            user_id: user_id.into(),
            product_id: product_id.into(),
            quantity,
        },
    )
    .await?;
    Ok(())
}

/// Registers a user and returns the verification token.
pub async fn register(
    state: &AppState,
    email: &str,
    password: &str,
    role: Option<Role>,
) -> anyhow::Result<String> {
    let resp = auth_service::register_user(
        &state.pool,
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            name: "Test User".into(),
            role,
        },
    )
    .await?;
    Ok(resp.token)
}
