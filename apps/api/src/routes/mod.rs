//! HTTP route handlers for the tunebridge API
//!
//! - Health and readiness endpoints
//! - Catalog search and song lookup
//! - Library playlists and playlist contents
//!
//! Unknown paths, and known paths hit with an unsupported method, answer
//! 404 `{"error": "Not found"}`.

pub mod health;
pub mod playlists;
pub mod search;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ApiError;
use crate::services::{CatalogSession, DiagnosticsService};

pub use health::health_router;
pub use playlists::playlists_router;
pub use search::search_router;

/// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    /// Catalog session, fixed at startup
    pub session: Arc<CatalogSession>,
    /// Readiness probes
    pub diagnostics: DiagnosticsService,
}

impl AppState {
    pub fn new(session: CatalogSession) -> Self {
        Self {
            session: Arc::new(session),
            diagnostics: DiagnosticsService::new(),
        }
    }
}

/// Fallback for unknown routes and unsupported methods
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Build the routes with state applied
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(health_router())
        .merge(search_router())
        .merge(playlists_router())
        .fallback(not_found)
        .with_state(state)
}

/// Build the full application: routes plus request tracing and CORS
pub fn build_app(state: AppState, cors: CorsLayer) -> Router {
    api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Build the CORS layer.
///
/// Without configured origins any origin is allowed. With `CORS_ORIGINS` set,
/// only the listed origins are; entries that are not valid header values
/// are skipped.
pub fn build_cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .max_age(std::time::Duration::from_secs(3600));

    let Some(origins) = origins.filter(|o| !o.is_empty()) else {
        tracing::info!("CORS allows any origin");
        return base.allow_origin(Any).allow_headers(Any);
    };

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                None
            })
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
        return CorsLayer::new();
    }

    tracing::info!(
        "CORS configured with {} allowed origin(s): {:?}",
        allowed_origins.len(),
        origins
    );
    base.allow_origin(allowed_origins).allow_headers([
        header::CONTENT_TYPE,
        header::ACCEPT,
        header::ORIGIN,
        header::AUTHORIZATION,
    ])
}
