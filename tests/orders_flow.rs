mod common;

use marketplace_api::{
    dto::{
        orders::{CheckoutRequest, UpdateOrderStatusRequest},
        reviews::CreateReviewRequest,
    },
    error::AppError,
    models::OrderStatus,
    services::{analytics_service, cart_service, order_service, review_service},
    state::AppState,
};

async fn checkout(state: &AppState, user_id: &str) -> Result<String, AppError> {
    let resp = order_service::checkout(
        state,
        CheckoutRequest {
            user_id: user_id.into(),
            address: "X".into(),
            payment_method: "card".into(),
        },
    )
    .await?;
    Ok(resp.order_id)
}

#[tokio::test]
async fn checkout_snapshots_cart_into_pending_order() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    common::add(&state, "u1", "1", 2).await?;
    let order_id = checkout(&state, "u1").await?;

    assert!(cart_service::get_cart(&state.pool, "u1").await?.is_empty());

    let orders = order_service::list_orders(&state, "u1").await?;
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.id, order_id);
    assert_eq!(order.total, 259.98);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.shipping_address, "X");
    assert_eq!(order.payment_method, "card");
    assert_eq!(order.items.len(), 1);
    let line = &order.items[0];
    assert_eq!(line.product_id, "1");
    assert_eq!(line.name, "Mechanical Gaming Keyboard");
    assert_eq!(line.quantity, 2);
    assert_eq!(line.seller_id.as_deref(), Some("s1"));
    assert_eq!(line.status, OrderStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn order_total_is_a_snapshot() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    common::add(&state, "u1", "2", 1).await?;
    common::add(&state, "u1", "3", 3).await?;
    checkout(&state, "u1").await?;

    sqlx::query("UPDATE products SET price = 1.0")
        .execute(&state.pool)
        .await?;

    let orders = order_service::list_orders(&state, "u1").await?;
    // 99.99 + 3 * 348.00
    assert_eq!(orders[0].total, 1143.99);
    assert_eq!(orders[0].items[1].price, 348.0);
    Ok(())
}

#[tokio::test]
async fn empty_cart_checkout_fails_without_creating_an_order() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let result = checkout(&state, "nobody").await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let (orders,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(orders, 0);
    Ok(())
}

#[tokio::test]
async fn re_adding_a_product_replaces_quantity() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    common::add(&state, "u1", "4", 3).await?;
    common::add(&state, "u1", "4", 5).await?;

    let cart = cart_service::get_cart(&state.pool, "u1").await?;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 5);
    assert_eq!(cart[0].product.id, "4");
    Ok(())
}

#[tokio::test]
async fn cart_rejects_bad_lines() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let zero = common::add(&state, "u1", "1", 0).await;
    assert!(zero.is_err());
    let unknown = common::add(&state, "u1", "missing", 1).await;
    assert!(unknown.is_err());
    assert!(cart_service::get_cart(&state.pool, "u1").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn clearing_the_cart_places_no_order() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    common::add(&state, "u1", "5", 1).await?;
    cart_service::clear_cart(&state.pool, "u1").await?;

    assert!(cart_service::get_cart(&state.pool, "u1").await?.is_empty());
    assert!(order_service::list_orders(&state, "u1").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn seller_sees_only_their_lines() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    // product 1 is sold by s1, product 2 by s2
    common::add(&state, "u1", "1", 1).await?;
    common::add(&state, "u1", "2", 2).await?;
    let order_id = checkout(&state, "u1").await?;

    let for_s1 = order_service::list_seller_orders(&state, "s1").await?;
    assert_eq!(for_s1.len(), 1);
    assert_eq!(for_s1[0].id, order_id);
    assert_eq!(for_s1[0].items.len(), 1);
    assert_eq!(for_s1[0].items[0].product_id, "1");

    let for_s2 = order_service::list_seller_orders(&state, "s2").await?;
    assert_eq!(for_s2[0].items.len(), 1);
    assert_eq!(for_s2[0].items[0].quantity, 2);

    assert!(order_service::list_seller_orders(&state, "s5").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn status_follows_the_transition_table() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    common::add(&state, "u1", "6", 1).await?;
    let order_id = checkout(&state, "u1").await?;

    let set = |status| UpdateOrderStatusRequest { status };

    let skip = order_service::update_order_status(&state, &order_id, set(OrderStatus::Delivered)).await;
    assert!(matches!(skip, Err(AppError::BadRequest(_))));

    order_service::update_order_status(&state, &order_id, set(OrderStatus::Shipped)).await?;
    order_service::update_order_status(&state, &order_id, set(OrderStatus::Shipped)).await?;
    order_service::update_order_status(&state, &order_id, set(OrderStatus::Delivered)).await?;

    let back = order_service::update_order_status(&state, &order_id, set(OrderStatus::Pending)).await;
    assert!(matches!(back, Err(AppError::BadRequest(_))));

    let orders = order_service::list_orders(&state, "u1").await?;
    assert_eq!(orders[0].status, OrderStatus::Delivered);

    let missing = order_service::update_order_status(&state, "nope", set(OrderStatus::Shipped)).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn orders_are_listed_newest_first() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    common::add(&state, "u1", "7", 1).await?;
    let first = checkout(&state, "u1").await?;
    common::add(&state, "u1", "8", 1).await?;
    let second = checkout(&state, "u1").await?;

    let orders = order_service::list_orders(&state, "u1").await?;
    let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    Ok(())
}

#[tokio::test]
async fn analytics_reflect_persisted_orders() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let empty = analytics_service::seller_analytics(&state).await?;
    assert_eq!(empty.total_sales, 0);
    assert!(empty.top_product.is_none());

    common::add(&state, "u1", "1", 2).await?;
    checkout(&state, "u1").await?;
    common::add(&state, "u2", "2", 1).await?;
    checkout(&state, "u2").await?;

    let stats = analytics_service::seller_analytics(&state).await?;
    assert_eq!(stats.total_sales, 2);
    assert_eq!(stats.total_revenue, 359.97);
    assert_eq!(stats.top_product.as_deref(), Some("Mechanical Gaming Keyboard"));
    assert_eq!(stats.monthly_revenue.len(), 1);
    assert_eq!(stats.monthly_revenue[0].amount, 359.97);
    Ok(())
}

#[tokio::test]
async fn reviews_are_appended_per_product() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    for (rating, comment) in [(5, "Great switches"), (3, "A bit loud")] {
        review_service::create_review(
            &state.pool,
            "1",
            CreateReviewRequest {
                user_id: "u1".into(),
                user_name: "Ada".into(),
                rating,
                comment: comment.into(),
            },
        )
        .await?;
    }

    let reviews = review_service::list_reviews(&state.pool, "1").await?;
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].comment, "A bit loud");
    assert_eq!(reviews[1].rating, 5);
    assert!(review_service::list_reviews(&state.pool, "2").await?.is_empty());

    let missing = review_service::create_review(
        &state.pool,
        "missing",
        CreateReviewRequest {
            user_id: "u1".into(),
            user_name: "Ada".into(),
            rating: 4,
            comment: String::new(),
        },
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_checkouts_of_one_cart_place_one_order() -> anyhow::Result<()> {
    let (state, path) = common::setup_file_state(5).await?;

    common::add(&state, "u1", "1", 2).await?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move { checkout(&state, "u1").await })
        })
        .collect();
    let mut placed = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => placed += 1,
            Err(AppError::BadRequest(_)) => rejected += 1,
            Err(other) => panic!("unexpected checkout error: {other:?}"),
        }
    }
    assert_eq!(placed, 1);
    assert_eq!(rejected, 3);

    let orders = order_service::list_orders(&state, "u1").await?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total, 259.98);
    assert!(cart_service::get_cart(&state.pool, "u1").await?.is_empty());

    common::remove_file_db(state, path).await;
    Ok(())
}

#[tokio::test]
async fn checkout_keeps_cart_order_in_line_items() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    for product in ["5", "2", "8"] {
        common::add(&state, "u1", product, 1).await?;
    }
    checkout(&state, "u1").await?;

    let orders = order_service::list_orders(&state, "u1").await?;
    let ids: Vec<&str> = orders[0].items.iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(ids, vec!["5", "2", "8"]);
    Ok(())
}

#[tokio::test]
async fn same_instant_orders_list_newest_first_for_buyer_and_seller() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    common::add(&state, "u1", "1", 1).await?;
    let first = checkout(&state, "u1").await?;
    common::add(&state, "u1", "5", 1).await?;
    let second = checkout(&state, "u1").await?;

    sqlx::query("UPDATE orders SET date = '2026-01-01T00:00:00.000000Z'")
        .execute(&state.pool)
        .await?;

    let expected = vec![second.as_str(), first.as_str()];
    let buyer = order_service::list_orders(&state, "u1").await?;
    let buyer_ids: Vec<&str> = buyer.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(buyer_ids, expected);

    // products 1 and 5 are both sold by s1
    let seller = order_service::list_seller_orders(&state, "s1").await?;
    let seller_ids: Vec<&str> = seller.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(seller_ids, expected);
    Ok(())
}
