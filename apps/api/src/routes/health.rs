//! Health check HTTP route handlers
//!
//! - `GET /health` - Liveness: always 200, reports whether the catalog client exists
//! - `GET /health/ready` - Readiness: probes the catalog, 503 when search is unusable

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::{not_found, AppState};

/// Liveness response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ytmusic_initialized: bool,
}

/// Create health check router
pub fn health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health).fallback(not_found))
        .route("/health/ready", get(readiness_probe).fallback(not_found))
}

/// Liveness check. Never fails, even without a catalog client.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        ytmusic_initialized: state.session.is_ready(),
    })
}

/// Readiness probe - runs live catalog checks
///
/// # Response
/// - 200 OK when healthy or degraded
/// - 503 Service Unavailable when there is no client or search fails
async fn readiness_probe(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.diagnostics.run(&state.session).await;

    let status_code = if report.is_unhealthy() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (status_code, Json(report))
}
