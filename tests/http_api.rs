mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use marketplace_api::routes::build_app;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> anyhow::Result<Router> {
    let state = common::setup_state().await?;
    build_app(state, &common::test_config())
}

fn json_request(method: &str, uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

#[tokio::test]
async fn lists_seeded_products() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Request::get("/products").body(Body::empty())?).await?;

    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().cloned().unwrap_or_default();
    assert_eq!(products.len(), 8);
    assert_eq!(products[0]["id"], "8");
    assert_eq!(products[7]["specs"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn cart_checkout_and_orders_over_http() -> anyhow::Result<()> {
    let app = app().await?;

    let add = json!({ "user_id": "u1", "product_id": "1", "quantity": 2 });
    let (status, body) = send(&app, json_request("POST", "/cart", add)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (_, cart) = send(&app, Request::get("/cart/u1").body(Body::empty())?).await?;
    assert_eq!(cart[0]["quantity"], 2);
    assert_eq!(cart[0]["product"]["name"], "Mechanical Gaming Keyboard");

    let checkout = json!({ "user_id": "u1", "address": "X", "payment_method": "card" });
    let (status, body) = send(&app, json_request("POST", "/checkout", checkout)?).await?;
    assert_eq!(status, StatusCode::OK);
    let order_id = body["order_id"].as_str().unwrap_or_default().to_string();
    assert!(!order_id.is_empty());

    let (_, orders) = send(&app, Request::get("/orders/u1").body(Body::empty())?).await?;
    assert_eq!(orders[0]["id"], order_id.as_str());
    assert_eq!(orders[0]["total"], 259.98);
    assert_eq!(orders[0]["status"], "Pending");

    let ship = json!({ "status": "Shipped" });
    let uri = format!("/orders/{order_id}/status");
    let (status, _) = send(&app, json_request("PATCH", &uri, ship)?).await?;
    assert_eq!(status, StatusCode::OK);

    let bogus = json!({ "status": "Teleported" });
    let (status, _) = send(&app, json_request("PATCH", &uri, bogus)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn bad_cart_input_is_a_bad_request() -> anyhow::Result<()> {
    let app = app().await?;

    let zero = json!({ "user_id": "u1", "product_id": "1", "quantity": 0 });
    let (status, body) = send(&app, json_request("POST", "/cart", zero)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");

    let malformed = Request::post("/cart")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, _) = send(&app, malformed).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let checkout = json!({ "user_id": "u1", "address": "X", "payment_method": "card" });
    let (status, body) = send(&app, json_request("POST", "/checkout", checkout)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().is_some());
    Ok(())
}

#[tokio::test]
async fn auth_errors_map_to_status_codes() -> anyhow::Result<()> {
    let app = app().await?;

    let register = json!({ "email": "ada@example.com", "password": "secret1", "name": "Ada" });
    let (status, body) = send(&app, json_request("POST", "/register", register.clone())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());

    let (status, body) = send(&app, json_request("POST", "/register", register)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "conflict");

    let bad_login = json!({ "email": "ada@example.com", "password": "wrong!" });
    let (status, _) = send(&app, json_request("POST", "/login", bad_login)?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let good_login = json!({ "email": "ada@example.com", "password": "secret1" });
    let (status, user) = send(&app, json_request("POST", "/login", good_login)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(user.get("password_hash").is_none());
    assert_eq!(user["isVerified"], false);
    let buyer_id = user["id"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(&app, Request::get("/admin/users").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let as_buyer = Request::get("/admin/users")
        .header("x-user-id", buyer_id)
        .body(Body::empty())?;
    let (status, body) = send(&app, as_buyer).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
    Ok(())
}

#[tokio::test]
async fn admin_sees_every_user() -> anyhow::Result<()> {
    let app = app().await?;

    let login = json!({ "email": "admin@marketplace.local", "password": "admin123" });
    let (status, admin) = send(&app, json_request("POST", "/login", login)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin["role"], "admin");

    let request = Request::get("/admin/users")
        .header("x-user-id", admin["id"].as_str().unwrap_or_default())
        .body(Body::empty())?;
    let (status, users) = send(&app, request).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn unknown_routes_and_resources_are_not_found() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Request::get("/nowhere").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = send(&app, Request::get("/user/missing").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let review = json!({ "user_id": "u1", "user_name": "Ada", "rating": 4, "comment": "ok" });
    let (status, _) = send(&app, json_request("POST", "/reviews/missing", review)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn responses_carry_cors_and_request_id_headers() -> anyhow::Result<()> {
    let app = app().await?;

    let request = Request::get("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}
