use std::{str::FromStr, time::Duration};

use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

use crate::{codec, config::AppConfig, services::auth_service::hash_password, state::AppState};

pub type DbPool = sqlx::SqlitePool;
pub type OrmConn = DatabaseConnection;

/// Open the SQLite pool. The database file is created when missing.
pub async fn create_pool(config: &AppConfig) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        // writers queue for the lock instead of failing with SQLITE_BUSY
        .busy_timeout(Duration::from_secs(5));

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
    // An in-memory database lives exactly as long as its connection, and each
    // connection would get its own.
    if config.database_url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    Ok(pool_options.connect_with(options).await?)
}

/// Wrap the sqlx pool in a SeaORM connection so both share one set of connections.
pub fn create_orm_conn(pool: &DbPool) -> OrmConn {
    SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone())
}

pub async fn connect(config: &AppConfig) -> Result<AppState> {
    let pool = create_pool(config).await?;
    let orm = create_orm_conn(&pool);
    Ok(AppState { pool, orm })
}

/// Create missing tables and seed demo data. Safe to run on every start.
pub async fn init(state: &AppState, config: &AppConfig) -> Result<()> {
    sqlx::migrate!("./migrations").run(&state.pool).await?;
    seed_products(&state.pool).await?;
    ensure_admin(&state.pool, &config.admin_email, &config.admin_password).await?;
    Ok(())
}

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    category: &'static str,
    image_seed: &'static str,
    rating: f64,
    specs: [&'static str; 3],
    seller_id: &'static str,
    seller_name: &'static str,
}

const SEED_PRODUCTS: [SeedProduct; 8] = [
    SeedProduct {
        id: "1",
        name: "Mechanical Gaming Keyboard",
        description: "Ultra-responsive RGB mechanical keyboard with tactile switches.",
        price: 129.99,
        category: "Gaming",
        image_seed: "keyboard",
        rating: 4.8,
        specs: ["RGB Lighting", "Tactile Brown Switches", "Aluminum Frame"],
        seller_id: "s1",
        seller_name: "Gaming Central",
    },
    SeedProduct {
        id: "2",
        name: "Logitech G Pro Wireless",
        description: "The preferred mouse for esports professionals worldwide.",
        price: 99.99,
        category: "Gaming",
        image_seed: "mouse",
        rating: 4.9,
        specs: ["Lightspeed Wireless", "HERO 25K Sensor", "80g Lightweight"],
        seller_id: "s2",
        seller_name: "ProGear",
    },
    SeedProduct {
        id: "3",
        name: "Sony WH-1000XM5",
        description: "Industry-leading noise canceling headphones with premium sound.",
        price: 348.00,
        category: "Audio",
        image_seed: "headphones",
        rating: 4.7,
        specs: ["30h Battery", "LDAC Support", "Multi-point Bluetooth"],
        seller_id: "s3",
        seller_name: "Audio Hub",
    },
    SeedProduct {
        id: "4",
        name: "Ergonomic Office Chair",
        description: "Premium mesh chair designed for 12+ hours of comfort.",
        price: 499.00,
        category: "Workstation",
        image_seed: "chair",
        rating: 4.6,
        specs: ["Adjustable Lumbar", "4D Armrests", "Breathable Mesh"],
        seller_id: "s4",
        seller_name: "Office Pro",
    },
    SeedProduct {
        id: "5",
        name: "Samsung 32\" Odyssey G7",
        description: "1000R curved gaming monitor with 240Hz refresh rate.",
        price: 699.99,
        category: "Gaming",
        image_seed: "monitor",
        rating: 4.5,
        specs: ["240Hz", "1ms response", "QLED Technology"],
        seller_id: "s1",
        seller_name: "Gaming Central",
    },
    SeedProduct {
        id: "6",
        name: "MacBook Pro 14\"",
        description: "The ultimate power machine for creators and pros.",
        price: 1999.00,
        category: "Electronics",
        image_seed: "laptop",
        rating: 4.9,
        specs: ["M3 Pro Chip", "Liquid Retina XDR", "18GB RAM"],
        seller_id: "s5",
        seller_name: "Apple Store",
    },
    SeedProduct {
        id: "7",
        name: "Keychron Q1 Pro",
        description: "Full aluminum custom wireless mechanical keyboard.",
        price: 189.00,
        category: "Workstation",
        image_seed: "keychron",
        rating: 4.8,
        specs: ["Gasket Mount", "Double-shot PBT", "Screw-in stabs"],
        seller_id: "s6",
        seller_name: "Keyboard Enthusiasts",
    },
    SeedProduct {
        id: "8",
        name: "Blue Yeti Microphone",
        description: "The gold standard for professional recording and streaming.",
        price: 109.99,
        category: "Audio",
        image_seed: "mic",
        rating: 4.4,
        specs: ["Tri-capsule array", "Multiple patterns", "USB connection"],
        seller_id: "s3",
        seller_name: "Audio Hub",
    },
];

async fn seed_products(pool: &DbPool) -> Result<()> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::debug!(count, "product table already populated, skipping seed");
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for product in &SEED_PRODUCTS {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, category, image, rating, specs, seller_id, seller_name)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.id)
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.category)
        .bind(format!("https://picsum.photos/seed/{}/400/400", product.image_seed))
        .bind(product.rating)
        .bind(codec::encode(&product.specs)?)
        .bind(product.seller_id)
        .bind(product.seller_name)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!(count = SEED_PRODUCTS.len(), "seeded demo products");
    Ok(())
}

async fn ensure_admin(pool: &DbPool, email: &str, password: &str) -> Result<()> {
    let (admins,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(pool)
        .await?;
    if admins > 0 {
        return Ok(());
    }

    let existing: Option<(String, String)> =
        sqlx::query_as("SELECT id, role FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await?;
    if let Some((id, role)) = existing {
        tracing::warn!(
            email,
            user_id = %id,
            previous_role = %role,
            "ADMIN_EMAIL belongs to a registered account; promoting it to admin, its password is unchanged"
        );
        sqlx::query("UPDATE users SET role = 'admin' WHERE id = ?")
            .bind(&id)
            .execute(pool)
            .await?;
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, is_verified)
        VALUES (?, 'Administrator', ?, ?, 'admin', 1)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(email)
    .bind(password_hash)
    .execute(pool)
    .await?;

    tracing::info!(email, "ensured admin account");
    Ok(())
}
