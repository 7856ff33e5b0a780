use crate::schemas::{ApiResponse, ErrorResponse, HealthResponse};
use crate::test_utils::{setup_test_app, spawn_upstream, Upstream};
use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use common::DashboardView;
use rust_decimal::Decimal;
use serde_json::json;

fn bearer(token: &'static str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

fn statement_body() -> serde_json::Value {
    let now = Utc::now();
    json!({"result": {"transactions": [
        {"id": 1, "date": (now - Duration::days(3)).to_rfc3339(), "value": 100, "type": "Credit"},
        {"id": 2, "date": (now - Duration::days(2)).to_rfc3339(), "value": -40, "type": "Debit", "to": "A"},
        {"id": 3, "date": (now - Duration::days(1)).to_rfc3339(), "value": -10, "type": "Debit", "to": "A"},
        {"id": 4, "date": (now - Duration::days(90)).to_rfc3339(), "value": -25, "type": "Debit", "to": "B"}
    ]}})
}

#[test]
fn test_setup_installs_global_tracing() {
    let _app = setup_test_app("http://upstream.invalid");

    assert!(tracing::enabled!(tracing::Level::ERROR));
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app("http://upstream.invalid");
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.upstream, "http://upstream.invalid");
}

#[tokio::test]
async fn test_dashboard_requires_bearer_token() {
    let upstream = spawn_upstream(
        Upstream::ok(json!({"result": {"account": [{"id": 1}]}})),
        Upstream::ok(statement_body()),
    )
    .await;
    let server = TestServer::new(setup_test_app(&upstream.base_url)).unwrap();

    let response = server.get("/api/v1/dashboard").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "UNAUTHORIZED");
    assert!(!body.success);
    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn test_dashboard_aggregates_statement() {
    let upstream = spawn_upstream(
        Upstream::ok(json!({"result": {"account": [{"id": 42}, {"id": 43}]}})),
        Upstream::ok(statement_body()),
    )
    .await;
    let server = TestServer::new(setup_test_app(&upstream.base_url)).unwrap();

    let response = server
        .get("/api/v1/dashboard")
        .add_header(AUTHORIZATION, bearer("token-1"))
        .await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<DashboardView> = response.json();
    assert!(body.success);
    assert_eq!(body.message, "Dashboard loaded successfully");

    let view = body.data;
    assert_eq!(view.balance, Decimal::new(25, 0));
    assert_eq!(view.credit_total, Decimal::new(100, 0));
    assert_eq!(view.debit_total, Decimal::new(50, 0));
    assert_eq!(view.expense_by_recipient.len(), 1);
    assert_eq!(view.expense_for("A"), Some(Decimal::new(50, 0)));
    assert_eq!(view.transactions.len(), 4);
    assert_eq!(view.recent_transactions.len(), 3);
    assert_eq!(view.transactions[0].id, "3");

    let requests = upstream.requests();
    assert_eq!(
        requests,
        vec![
            ("/account".to_string(), Some("Bearer token-1".to_string())),
            ("/account/42/statement".to_string(), Some("Bearer token-1".to_string())),
        ]
    );
}

#[tokio::test]
async fn test_dashboard_account_failure_skips_statement() {
    let upstream = spawn_upstream(
        Upstream::failing(StatusCode::UNAUTHORIZED),
        Upstream::ok(statement_body()),
    )
    .await;
    let server = TestServer::new(setup_test_app(&upstream.base_url)).unwrap();

    let response = server
        .get("/api/v1/dashboard")
        .add_header(AUTHORIZATION, bearer("stale"))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "ACCOUNT_FETCH_FAILED");
    assert!(body.error.starts_with("Failed to fetch account data"));
    assert_eq!(upstream.paths(), vec!["/account"]);
}

#[tokio::test]
async fn test_dashboard_empty_account_list() {
    let upstream = spawn_upstream(
        Upstream::ok(json!({"result": {"account": []}})),
        Upstream::ok(statement_body()),
    )
    .await;
    let server = TestServer::new(setup_test_app(&upstream.base_url)).unwrap();

    let response = server
        .get("/api/v1/dashboard")
        .add_header(AUTHORIZATION, bearer("t"))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "ACCOUNT_FETCH_FAILED");
    assert_eq!(upstream.paths(), vec!["/account"]);
}

#[tokio::test]
async fn test_dashboard_statement_failure() {
    let upstream = spawn_upstream(
        Upstream::ok(json!({"result": {"account": [{"id": "acc-7"}]}})),
        Upstream::failing(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .await;
    let server = TestServer::new(setup_test_app(&upstream.base_url)).unwrap();

    let response = server
        .get("/api/v1/dashboard")
        .add_header(AUTHORIZATION, bearer("t"))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "STATEMENT_FETCH_FAILED");
    assert!(body.error.starts_with("Failed to fetch transactions"));
    assert_eq!(upstream.paths(), vec!["/account", "/account/acc-7/statement"]);
}

#[tokio::test]
async fn test_dashboard_empty_statement() {
    let upstream = spawn_upstream(
        Upstream::ok(json!({"result": {"account": [{"id": 1}]}})),
        Upstream::ok(json!({"result": {"transactions": []}})),
    )
    .await;
    let server = TestServer::new(setup_test_app(&upstream.base_url)).unwrap();

    let response = server
        .get("/api/v1/dashboard")
        .add_header(AUTHORIZATION, bearer("t"))
        .await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<DashboardView> = response.json();
    assert_eq!(body.data.balance, Decimal::ZERO);
    assert!(body.data.transactions.is_empty());
    assert!(body.data.expense_by_recipient.is_empty());
}
