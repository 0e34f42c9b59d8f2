use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    codec,
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::products::{ActiveModel, Entity as Products},
    error::{AppError, AppResult},
    models::Product,
    response::{CreatedResponse, StatusResponse},
    state::AppState,
};

pub const INITIAL_RATING: f64 = 5.0;

pub fn placeholder_image(product_id: &str) -> String {
    format!("https://picsum.photos/seed/{product_id}/400/400")
}

/// Every product, most recently inserted first.
pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    Products::find()
        .order_by_desc(Expr::cust("rowid"))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::try_from)
        .collect()
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<CreatedResponse> {
    let id = Uuid::new_v4().to_string();
    let image = payload
        .image
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| placeholder_image(&id));

    let active = ActiveModel {
        id: Set(id.clone()),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        category: Set(payload.category),
        image: Set(image),
        rating: Set(INITIAL_RATING),
        specs: Set(codec::encode(&payload.specs)?),
        seller_id: Set(payload.seller_id),
        seller_name: Set(payload.seller_name),
    };
    Products::insert(active)
        .exec_without_returning(&state.orm)
        .await?;

    tracing::debug!(product_id = %id, "product created");
    audit::record(
        &state.pool,
        None,
        "product_create",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(CreatedResponse::success(id))
}

pub async fn update_product(
    state: &AppState,
    id: &str,
    payload: UpdateProductRequest,
) -> AppResult<StatusResponse> {
    if payload.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }

    let existing = Products::find_by_id(id.to_string())
        .one(&state.orm)
        .await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound(format!("Product {id}"))),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(specs) = payload.specs {
        active.specs = Set(codec::encode(&specs)?);
    }
    active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        None,
        "product_update",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(StatusResponse::success())
}
