//! Test helper functions for API integration tests
//!
//! Builds the application around a given session and sends single requests
//! through it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use tunebridge_api::{build_app, build_cors_layer, AppState, CatalogSession};

use super::StubCatalog;

/// Full application (routes, tracing, permissive CORS) around `session`
pub fn app(session: CatalogSession) -> Router {
    build_app(AppState::new(session), build_cors_layer(None))
}

/// Application backed by `stub`; authentication follows the stub
pub fn app_with_stub(stub: &Arc<StubCatalog>) -> Router {
    use tunebridge_catalog_client::CatalogClient;

    let authenticated = stub.is_authenticated();
    app(CatalogSession::ready(stub.clone(), authenticated))
}

/// Application with no catalog client
pub fn app_not_ready() -> Router {
    app(CatalogSession::uninitialized())
}

/// Send a request and decode the JSON body (`Value::Null` when empty)
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a raw body with a JSON content type
pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST with an empty body
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Assert an `{"error": message}` body
pub fn assert_error(body: &Value, message: &str) {
    assert_eq!(body, &serde_json::json!({ "error": message }));
}
