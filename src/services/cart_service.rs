use sqlx::FromRow;

use crate::{
    audit,
    db::DbPool,
    dto::cart::{AddToCartRequest, CartEntry},
    entity::products,
    error::{AppError, AppResult},
    models::Product,
    response::StatusResponse,
};

#[derive(FromRow)]
struct CartWithProductRow {
    quantity: i32,
    id: String,
    name: String,
    description: String,
    price: f64,
    category: String,
    image: String,
    rating: f64,
    specs: String,
    seller_id: Option<String>,
    seller_name: Option<String>,
}

impl CartWithProductRow {
    fn into_entry(self) -> AppResult<CartEntry> {
        let product = Product::try_from(products::Model {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            rating: self.rating,
            specs: self.specs,
            seller_id: self.seller_id,
            seller_name: self.seller_name,
        })?;
        Ok(CartEntry {
            product,
            quantity: self.quantity,
        })
    }
}

/// Cart lines joined with their products. Unknown users simply have an empty cart.
pub async fn get_cart(pool: &DbPool, user_id: &str) -> AppResult<Vec<CartEntry>> {
    let rows = sqlx::query_as::<_, CartWithProductRow>(
        r#"
        SELECT c.quantity,
               p.id, p.name, p.description, p.price, p.category, p.image, p.rating, p.specs,
               p.seller_id, p.seller_name
        FROM cart_items c
        JOIN products p ON p.id = c.product_id
        WHERE c.user_id = ?
        ORDER BY c.rowid
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(CartWithProductRow::into_entry).collect()
}

/// Insert the line or replace its quantity; quantities never accumulate.
pub async fn add_to_cart(pool: &DbPool, payload: AddToCartRequest) -> AppResult<StatusResponse> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let product_exist: Option<(String,)> = sqlx::query_as("SELECT id FROM products WHERE id = ?")
        .bind(&payload.product_id)
        .fetch_optional(pool)
        .await?;
    if product_exist.is_none() {
        return Err(AppError::BadRequest("product not found".to_string()));
    }

    sqlx::query(
        r#"
        INSERT INTO cart_items (user_id, product_id, quantity)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id, product_id) DO UPDATE SET quantity = excluded.quantity
        "#,
    )
    .bind(&payload.user_id)
    .bind(&payload.product_id)
    .bind(payload.quantity)
    .execute(pool)
    .await?;

    audit::record(
        pool,
        Some(&payload.user_id),
        "cart_update",
        "cart_items",
        serde_json::json!({ "product_id": payload.product_id, "quantity": payload.quantity }),
    )
    .await;

    Ok(StatusResponse::success())
}

/// Empty the cart. Placing an order is `order_service::checkout`'s job alone.
pub async fn clear_cart(pool: &DbPool, user_id: &str) -> AppResult<StatusResponse> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    audit::record(
        pool,
        Some(user_id),
        "cart_clear",
        "cart_items",
        serde_json::json!({ "removed": result.rows_affected() }),
    )
    .await;

    Ok(StatusResponse::success())
}
