use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use storefront_orders::auth::{TokenService, TokenUser};
use storefront_orders::gateway::{build_router, state::AppState};
use storefront_orders::orders::{MemoryOrderRepository, OrderService, TransitionPolicy};

const SECRET: &str = "router-test-secret";

/// Router over the demo store: user 7 owns 42 (pending) and 43 (shipped),
/// user 8 owns 44 (pending).
fn app(policy: TransitionPolicy) -> Router {
    let repo = MemoryOrderRepository::new();
    repo.seed_demo();
    let orders = Arc::new(OrderService::new(
        Arc::new(repo),
        policy,
        Duration::from_secs(5),
    ));
    let tokens = Arc::new(TokenService::new(SECRET));
    build_router(Arc::new(AppState::new(orders, tokens)))
}

fn token_for(user_id: i64) -> String {
    TokenService::new(SECRET)
        .issue(&TokenUser {
            id: user_id,
            email: format!("user{user_id}@example.com"),
            role: "customer".to_string(),
            name: format!("User {user_id}"),
        })
        .unwrap()
}

/// Send one request, return status and parsed envelope
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app(TransitionPolicy::Strict);
    let (status, body) = send(&app, "GET", "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert!(body["data"]["timestamp_ms"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_orders_require_bearer_token() {
    let app = app(TransitionPolicy::Strict);

    let (status, body) = send(&app, "GET", "/api/v1/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2001);

    let (status, body) = send(&app, "GET", "/api/v1/orders", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2002);
    assert_eq!(body["msg"], "Invalid or expired token");

    // Signed with a different secret
    let forged = TokenService::new("other-secret")
        .issue(&TokenUser {
            id: 7,
            email: "ada@example.com".to_string(),
            role: "customer".to_string(),
            name: "Ada".to_string(),
        })
        .unwrap();
    let (status, _) = send(&app, "POST", "/api/v1/orders/42/cancel", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_only_callers_orders() {
    let app = app(TransitionPolicy::Strict);
    let (status, body) = send(&app, "GET", "/api/v1/orders", Some(&token_for(7)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);

    let orders = body["data"]["orders"].as_array().unwrap();
    assert_eq!(orders[0]["id"], 42);
    assert_eq!(orders[0]["status_label"], "Pending");
    assert_eq!(orders[0]["status_badge"], "warning");
    assert_eq!(orders[0]["cancellable"], true);
    assert_eq!(orders[0]["item_count"], 2);
    assert_eq!(orders[0]["total_display"], "72.48");
    assert_eq!(orders[1]["id"], 43);
    assert_eq!(orders[1]["cancellable"], false);

    let (_, body) = send(&app, "GET", "/api/v1/orders", Some(&token_for(99)), None).await;
    assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn test_detail_hides_other_users_orders() {
    let app = app(TransitionPolicy::Strict);

    let (status, body) = send(&app, "GET", "/api/v1/orders/42", Some(&token_for(7)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order"]["id"], 42);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["items"][0]["price_display"], "29.99");

    let (status, foreign) = send(&app, "GET", "/api/v1/orders/42", Some(&token_for(8)), None).await;
    let (_, missing) = send(&app, "GET", "/api/v1/orders/9999", Some(&token_for(8)), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(foreign, missing, "foreign and missing orders must look the same");
    assert_eq!(foreign["code"], 4001);
}

#[tokio::test]
async fn test_cancel_once() {
    let app = app(TransitionPolicy::Strict);
    let token = token_for(7);

    let (status, body) = send(&app, "POST", "/api/v1/orders/42/cancel", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Order cancelled successfully.");
    assert_eq!(body["data"]["order_id"], 42);

    let (status, body) = send(&app, "POST", "/api/v1/orders/42/cancel", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);
    assert_eq!(
        body["msg"],
        "Unable to cancel order. Order may have already been processed."
    );

    let (_, body) = send(&app, "GET", "/api/v1/orders/42", Some(&token), None).await;
    assert_eq!(body["data"]["order"]["order_status"], "cancelled");
    assert_eq!(body["data"]["order"]["status_badge"], "danger");
}

#[tokio::test]
async fn test_cancel_foreign_order_rejected() {
    let app = app(TransitionPolicy::Strict);
    let (status, _) = send(&app, "POST", "/api/v1/orders/44/cancel", Some(&token_for(7)), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Untouched for its owner
    let (_, body) = send(&app, "GET", "/api/v1/orders/44", Some(&token_for(8)), None).await;
    assert_eq!(body["data"]["order"]["order_status"], "pending");
}

#[tokio::test]
async fn test_update_status() {
    let app = app(TransitionPolicy::Strict);
    let token = token_for(7);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/orders/42/status",
        Some(&token),
        Some(json!({"new_status": "processing"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Order status updated successfully.");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/orders/42/status",
        Some(&token),
        Some(json!({"new_status": "refunded"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["msg"], "Invalid order status.");

    // Strict: shipped cannot go back to pending
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/orders/43/status",
        Some(&token),
        Some(json!({"new_status": "pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["msg"], "Failed to update order status.");
}

#[tokio::test]
async fn test_permissive_policy_allows_any_move() {
    let app = app(TransitionPolicy::Permissive);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/orders/43/status",
        Some(&token_for(7)),
        Some(json!({"new_status": "pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_input_uses_envelope() {
    let app = app(TransitionPolicy::Strict);
    let token = token_for(7);

    let (status, body) = send(&app, "GET", "/api/v1/orders/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["msg"], "Invalid path parameter.");

    let (status, body) = send(&app, "POST", "/api/v1/orders/abc/cancel", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);

    // Wrong field name
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/orders/42/status",
        Some(&token),
        Some(json!({"status": "shipped"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["msg"], "Invalid request body.");

    // No body at all
    let (status, body) = send(&app, "POST", "/api/v1/orders/42/status", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);

    // Order untouched
    let (_, body) = send(&app, "GET", "/api/v1/orders/42", Some(&token), None).await;
    assert_eq!(body["data"]["order"]["order_status"], "pending");
}

#[tokio::test]
async fn test_bearer_scheme_case_insensitive() {
    let app = app(TransitionPolicy::Strict);
    let req = Request::builder()
        .uri("/api/v1/orders")
        .header(header::AUTHORIZATION, format!("bearer {}", token_for(7)))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[cfg(feature = "legacy-tokens")]
#[tokio::test]
async fn test_legacy_inspect_reports_numeric_claims() {
    let app = app(TransitionPolicy::Strict);
    // base64 of {"user_id":7.5}
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/legacy/inspect",
        Some(&token_for(7)),
        Some(json!({"token": "eyJ1c2VyX2lkIjo3LjV9"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], true);
    assert!(body["data"]["user_id"].is_null());
}

#[tokio::test]
async fn test_legacy_endpoint_absent_by_default() {
    let app = app(TransitionPolicy::Strict);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/legacy/inspect",
        Some(&token_for(7)),
        Some(json!({"token": "eyJ1c2VyX2lkIjo3fQ=="})),
    )
    .await;
    if cfg!(feature = "legacy-tokens") {
        assert_eq!(status, StatusCode::OK);
    } else {
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
