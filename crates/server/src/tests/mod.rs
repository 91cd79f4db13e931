// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::json;
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(Box::new(persistence), TradeLimits::default())
}

/// Sends one request and returns the status and parsed JSON body.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (HttpStatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn admin() -> Value {
    json!({ "actor_id": "admin-1", "actor_roles": ["ROLE_ADMIN"] })
}

fn with_actor(actor: &Value, payload: &Value) -> Value {
    let mut merged = actor.clone();
    if let (Some(target), Some(fields)) = (merged.as_object_mut(), payload.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    merged
}

fn create_ad_body() -> Value {
    json!({
        "actor_id": "seller-1",
        "actor_roles": "ROLE_USER",
        "direction": "sell",
        "amount": "100",
        "price": "62500",
        "currency": "NGN",
        "min_amount_per_transaction": "10",
        "max_amount_per_transaction": "50",
        "settlement_methods": ["bank_transfer"],
        "terms": "Pay within the window"
    })
}

async fn create_ad(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/ads", Some(create_ad_body())).await;
    assert_eq!(status, HttpStatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn create_published_ad(app: &Router) -> String {
    let id = create_ad(app).await;
    for op in ["approve", "publish"] {
        let (status, _) = send(app, "POST", &format!("/ads/{id}/{op}"), Some(admin())).await;
        assert_eq!(status, HttpStatusCode::OK);
    }
    id
}

async fn open_transaction(app: &Router, ad_id: &str) -> String {
    let body = json!({
        "actor_id": "buyer-1",
        "actor_roles": ["ROLE_USER"],
        "ad_id": ad_id,
        "buyer": "buyer-1",
        "seller": "seller-1",
        "crypto_amount": "20",
        "fiat_amount": "1250000"
    });
    let (status, body) = send(app, "POST", "/transactions", Some(body)).await;
    assert_eq!(status, HttpStatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_and_fetch_ad() {
    let app: Router = build_router(create_test_app_state());
    let id = create_ad(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/ads/{id}?actor_id=seller-1&actor_roles=ROLE_USER"),
        None,
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["owner"], "seller-1");
}

#[tokio::test]
async fn test_create_ad_with_min_above_amount_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let mut body = create_ad_body();
    body["min_amount_per_transaction"] = json!("150");
    body["max_amount_per_transaction"] = Value::Null;

    let (status, body) = send(&app, "POST", "/ads", Some(body)).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");
}

#[tokio::test]
async fn test_blank_actor_is_unauthenticated() {
    let app: Router = build_router(create_test_app_state());
    let mut body = create_ad_body();
    body["actor_id"] = json!("");

    let (status, body) = send(&app, "POST", "/ads", Some(body)).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "authentication_failed");
}

#[tokio::test]
async fn test_approve_by_user_is_forbidden() {
    let app: Router = build_router(create_test_app_state());
    let id = create_ad(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/ads/{id}/approve"),
        Some(json!({ "actor_id": "seller-1", "actor_roles": ["ROLE_USER"] })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "unauthorized");
}

#[tokio::test]
async fn test_double_approve_is_conflict() {
    let app: Router = build_router(create_test_app_state());
    let id = create_ad(&app).await;
    let uri = format!("/ads/{id}/approve");

    let (first, body) = send(&app, "POST", &uri, Some(admin())).await;
    assert_eq!(first, HttpStatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["approved_by"], "admin-1");

    let (second, body) = send(&app, "POST", &uri, Some(admin())).await;
    assert_eq!(second, HttpStatusCode::CONFLICT);
    assert_eq!(body["kind"], "invalid_transition");
}

#[tokio::test]
async fn test_reject_with_reason_accepts_comma_separated_roles() {
    let app: Router = build_router(create_test_app_state());
    let id = create_ad(&app).await;

    let body = json!({
        "actor_id": "admin-1",
        "actor_roles": "ROLE_USER, ROLE_ADMIN",
        "reason": "misleading terms"
    });
    let (status, body) = send(&app, "POST", &format!("/ads/{id}/reject"), Some(body)).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["admin_note"], "misleading terms");
}

#[tokio::test]
async fn test_unknown_ad_and_unknown_operation_are_not_found() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/ads/6f1c1d9e-6a53-4c3e-9d4b-6f6b4a0f1e2a/approve",
        Some(admin()),
    )
    .await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    let id = create_ad(&app).await;
    let (status, _) = send(&app, "POST", &format!("/ads/{id}/release_funds"), Some(admin())).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_fetch_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    let id = create_published_ad(&app).await;

    let (status, body) = send(&app, "POST", &format!("/ads/{id}/delete"), Some(admin())).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["id"], id.as_str());

    let (status, _) = send(
        &app,
        "GET",
        &format!("/ads/{id}?actor_id=admin-1&actor_roles=ROLE_ADMIN"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ad_transition_listing() {
    let app: Router = build_router(create_test_app_state());
    let id = create_ad(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/ads/{id}/transitions?actor_id=admin-1&actor_roles=ROLE_ADMIN"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["transitions"], json!(["approve", "reject", "delete"]));

    let (_, body) = send(
        &app,
        "GET",
        &format!("/ads/{id}/transitions?actor_id=seller-1&actor_roles=ROLE_USER"),
        None,
    )
    .await;
    assert_eq!(body["transitions"], json!([]));
}

#[tokio::test]
async fn test_transaction_settlement_flow() {
    let app: Router = build_router(create_test_app_state());
    let ad_id = create_published_ad(&app).await;
    let id = open_transaction(&app, &ad_id).await;

    let (_, listing) = send(
        &app,
        "GET",
        &format!("/transactions/{id}/transitions?actor_id=admin-1&actor_roles=ROLE_ADMIN"),
        None,
    )
    .await;
    assert_eq!(listing["transitions"], json!(["cancel", "mark_paid"]));

    let paid = with_actor(&admin(), &json!({ "payment_reference": "BANK-REF-001" }));
    let (status, body) = send(
        &app,
        "POST",
        &format!("/transactions/{id}/mark_paid"),
        Some(paid),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "paid");
    assert_eq!(body["payment_reference"], "BANK-REF-001");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/transactions/{id}/release_funds"),
        Some(admin()),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "released");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/transactions/{id}/cancel"),
        Some(admin()),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["kind"], "invalid_transition");
}

#[tokio::test]
async fn test_overflowing_expiry_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let ad_id = create_published_ad(&app).await;
    let body = json!({
        "actor_id": "buyer-1",
        "actor_roles": ["ROLE_USER"],
        "ad_id": ad_id,
        "buyer": "buyer-1",
        "seller": "seller-1",
        "crypto_amount": "20",
        "fiat_amount": "1250000",
        "expiry_minutes": i64::MAX
    });

    let (status, body) = send(&app, "POST", "/transactions", Some(body)).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");
}

#[tokio::test]
async fn test_bulk_partition_over_http() {
    let app: Router = build_router(create_test_app_state());
    let a = create_ad(&app).await;
    let b = create_ad(&app).await;
    let c = create_ad(&app).await;
    send(&app, "POST", &format!("/ads/{b}/approve"), Some(admin())).await;

    let body = with_actor(
        &admin(),
        &json!({ "resource": "ads", "op": "approve", "ids": [a, b, c] }),
    );
    let (status, outcome) = send(&app, "POST", "/bulk", Some(body)).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(outcome["succeeded"], json!([a, c]));
    assert_eq!(outcome["failed"][0]["id"], b.as_str());
    assert_eq!(outcome["failed"][0]["kind"], "invalid_transition");
    assert_eq!(outcome["abandoned"], json!([]));
}

#[tokio::test]
async fn test_bulk_with_empty_ids_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let body = with_actor(
        &admin(),
        &json!({ "resource": "ads", "op": "approve", "ids": [] }),
    );

    let (status, body) = send(&app, "POST", "/bulk", Some(body)).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");
}

#[tokio::test]
async fn test_audit_trail_endpoint() {
    let app: Router = build_router(create_test_app_state());
    let id = create_ad(&app).await;
    send(&app, "POST", &format!("/ads/{id}/approve"), Some(admin())).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/audit/ads/{id}?actor_id=admin-1&actor_roles=ROLE_ADMIN"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let actions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["CreateAd", "ApproveAd"]);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/audit/ads/{id}?actor_id=seller-1&actor_roles=ROLE_USER"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[test]
fn test_status_mapping() {
    let expected = [
        (ErrorKind::AuthenticationFailed, StatusCode::UNAUTHORIZED),
        (ErrorKind::Unauthorized, StatusCode::FORBIDDEN),
        (ErrorKind::InvalidTransition, StatusCode::CONFLICT),
        (ErrorKind::Conflict, StatusCode::CONFLICT),
        (ErrorKind::NotFound, StatusCode::NOT_FOUND),
        (ErrorKind::ValidationError, StatusCode::BAD_REQUEST),
        (ErrorKind::AlreadyExpired, StatusCode::GONE),
        (ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (kind, status) in expected {
        assert_eq!(status_for(kind), status, "{kind:?}");
    }
}

#[tokio::test]
async fn test_ephemeral_store_serves_requests() {
    let state = AppState::new(Box::new(InMemoryStore::new()), TradeLimits::default());
    let app: Router = build_router(state);

    let id = create_ad(&app).await;
    let (status, _) = send(&app, "POST", &format!("/ads/{id}/approve"), Some(admin())).await;
    assert_eq!(status, HttpStatusCode::OK);
}
