//! tunebridge API library
//!
//! Exposes the gateway's components for the binary and for integration
//! tests: configuration, the catalog session, normalization, and the axum
//! router.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::{api_router, build_app, build_cors_layer, AppState};
pub use services::CatalogSession;
