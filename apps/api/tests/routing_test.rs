//! Integration tests for routing fallbacks and CORS

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;
use tunebridge_api::{build_app, build_cors_layer, AppState, CatalogSession};

use common::*;

#[tokio::test]
async fn test_unknown_path_is_json_not_found() {
    let (status, body) = get(app_not_ready(), "/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "Not found");
}

#[tokio::test]
async fn test_playlist_without_id_is_not_found() {
    let (status, body) = get(app_not_ready(), "/playlist/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "Not found");
}

#[tokio::test]
async fn test_unsupported_methods_are_not_found() {
    let stub = Arc::new(StubCatalog::new());

    for (method, uri) in [
        ("GET", "/search"),
        ("GET", "/get_song"),
        ("POST", "/health"),
        ("DELETE", "/playlists"),
        ("PUT", "/playlist/PL1"),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app_with_stub(&stub), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_error(&body, "Not found");
    }
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://skill.example.com")
        .body(Body::empty())
        .unwrap();

    let response = app_not_ready().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/search")
        .header(header::ORIGIN, "https://skill.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app_not_ready().oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn test_cors_restricted_origins() {
    let origins = vec!["https://alexa.example.com".to_string()];
    let app = || {
        build_app(
            AppState::new(CatalogSession::uninitialized()),
            build_cors_layer(Some(origins.as_slice())),
        )
    };

    let allowed = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://alexa.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(allowed).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://alexa.example.com"
    );

    let denied = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://elsewhere.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(denied).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
