use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbBackend, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, Set, Statement, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    codec,
    dto::orders::{CheckoutRequest, CheckoutResponse, UpdateOrderStatusRequest},
    entity::{
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        products::{self, Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{LineItem, Order, OrderStatus},
    response::{SUCCESS, StatusResponse},
    state::AppState,
};

#[derive(Debug, FromQueryResult)]
struct ClaimedLine {
    seq: i64,
    product_id: String,
    quantity: i32,
}

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Turn the user's cart into a pending order and empty the cart, atomically.
///
/// The cart is claimed with a delete before anything is read, so the write lock
/// is held from the first statement. A concurrent checkout of the same cart
/// waits for it and then finds the cart empty.
pub async fn checkout(state: &AppState, payload: CheckoutRequest) -> AppResult<CheckoutResponse> {
    let txn = state.orm.begin().await?;

    let mut claimed = ClaimedLine::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Sqlite,
        r#"
        DELETE FROM cart_items
        WHERE user_id = ?
        RETURNING rowid AS seq, product_id, quantity
        "#,
        [payload.user_id.as_str().into()],
    ))
    .all(&txn)
    .await?;
    // RETURNING gives no ordering guarantee
    claimed.sort_by_key(|line| line.seq);

    let catalog: HashMap<String, products::Model> = Products::find()
        .filter(ProdCol::Id.is_in(claimed.iter().map(|line| line.product_id.clone())))
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    let mut items: Vec<LineItem> = Vec::with_capacity(claimed.len());
    for line in claimed {
        if line.quantity <= 0 {
            return Err(AppError::BadRequest("Cart has invalid quantity".into()));
        }
        // lines whose product is gone are dropped, as the cart view hides them
        let Some(product) = catalog.get(&line.product_id) else {
            continue;
        };
        items.push(LineItem {
            product_id: line.product_id,
            name: product.name.clone(),
            price: product.price,
            quantity: line.quantity,
            seller_id: product.seller_id.clone(),
            status: OrderStatus::Pending,
        });
    }
    if items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    let total = round_cents(items.iter().map(LineItem::subtotal).sum());

    let order_id = Uuid::new_v4().to_string();
    let order = OrderActive {
        id: Set(order_id.clone()),
        user_id: Set(payload.user_id.clone()),
        date: Set(now_timestamp()),
        total: Set(total),
        status: Set(OrderStatus::Pending.to_string()),
        shipping_address: Set(payload.address),
        payment_method: Set(payload.payment_method),
        items: Set(codec::encode(&items)?),
    };
    Orders::insert(order).exec_without_returning(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = %order_id, user_id = %payload.user_id, total, lines = items.len(), "order placed");
    audit::record(
        &state.pool,
        Some(&payload.user_id),
        "checkout",
        "orders",
        serde_json::json!({ "order_id": order_id, "total": total }),
    )
    .await;

    Ok(CheckoutResponse {
        status: SUCCESS.to_string(),
        order_id,
    })
}

pub async fn list_orders(state: &AppState, user_id: &str) -> AppResult<Vec<Order>> {
    Orders::find()
        .filter(OrderCol::UserId.eq(user_id))
        .order_by_desc(OrderCol::Date)
        .order_by_desc(Expr::cust("rowid"))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::try_from)
        .collect()
}

/// Orders containing at least one of the seller's lines, narrowed to those lines.
///
/// Line items live inside the JSON column, so this scans every order.
pub async fn list_seller_orders(state: &AppState, seller_id: &str) -> AppResult<Vec<Order>> {
    let mut result = Vec::new();
    for model in Orders::find()
        .order_by_desc(OrderCol::Date)
        .order_by_desc(Expr::cust("rowid"))
        .all(&state.orm)
        .await?
    {
        if let Some(order) = Order::try_from(model)?.for_seller(seller_id) {
            result.push(order);
        }
    }
    Ok(result)
}

pub async fn update_order_status(
    state: &AppState,
    id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<StatusResponse> {
    let existing = Orders::find_by_id(id.to_string()).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound(format!("Order {id}"))),
    };

    let current: OrderStatus = existing.status.parse()?;
    let next = payload.status;
    if !current.can_transition_to(next) {
        return Err(AppError::BadRequest(format!(
            "Cannot change order status from {current} to {next}"
        )));
    }
    if current == next {
        return Ok(StatusResponse::success());
    }

    let mut active: OrderActive = existing.into();
    active.status = Set(next.to_string());
    active.update(&state.orm).await?;

    tracing::info!(order_id = %id, from = %current, to = %next, "order status changed");
    audit::record(
        &state.pool,
        None,
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": id, "status": next }),
    )
    .await;

    Ok(StatusResponse::success())
}
