use uuid::Uuid;

use crate::{
    audit,
    db::DbPool,
    dto::reviews::CreateReviewRequest,
    error::{AppError, AppResult},
    models::Review,
    response::StatusResponse,
    services::order_service::now_timestamp,
};

/// Reviews for a product, newest first.
pub async fn list_reviews(pool: &DbPool, product_id: &str) -> AppResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        r#"
        SELECT id, product_id, user_id, user_name, rating, comment, date
        FROM reviews
        WHERE product_id = ?
        ORDER BY date DESC, rowid DESC
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

pub async fn create_review(
    pool: &DbPool,
    product_id: &str,
    payload: CreateReviewRequest,
) -> AppResult<StatusResponse> {
    let product_exists: Option<(String,)> = sqlx::query_as("SELECT id FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    if product_exists.is_none() {
        return Err(AppError::NotFound(format!("Product {product_id}")));
    }

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO reviews (id, product_id, user_id, user_name, rating, comment, date)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(product_id)
    .bind(&payload.user_id)
    .bind(&payload.user_name)
    .bind(payload.rating)
    .bind(&payload.comment)
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    audit::record(
        pool,
        Some(&payload.user_id),
        "review_create",
        "reviews",
        serde_json::json!({ "review_id": id, "product_id": product_id }),
    )
    .await;

    Ok(StatusResponse::success())
}
