//! Health and documentation endpoint tests.
//!
//! Run with: `cargo test -p filedrop-api --test health_test`

mod helpers;

use axum::http::StatusCode;
use helpers::setup_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_with_writable_store() {
    let app = setup_test_app().await;

    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_lists_file_routes() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let paths = body["paths"].as_object().expect("paths object");
    assert!(paths.contains_key("/api/v0/files"));
    assert!(paths.contains_key("/api/v0/files/base64"));
    assert!(paths.contains_key("/api/v0/files/download"));
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-frame-options"), "DENY");
    assert_eq!(response.header("cache-control"), "no-store, private");
}
