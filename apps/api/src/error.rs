//! Error handling for the tunebridge API
//!
//! Every failure a handler can produce is an [`ApiError`]. Its `IntoResponse`
//! implementation picks the status code and renders the `{"error": "..."}`
//! body the voice skill expects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tunebridge_catalog_client::CatalogError;

/// Message returned whenever the catalog session could not be established
pub const NOT_READY_MESSAGE: &str = "YouTube Music API not initialized";

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// API error taxonomy
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Request Errors ==========
    /// Required input missing or empty
    #[error("{0}")]
    Validation(String),

    /// Request body is not valid JSON for the endpoint
    #[error("{0}")]
    InvalidBody(String),

    // ========== Resource Errors ==========
    /// Entity absent upstream, or no such route
    #[error("{0}")]
    NotFound(String),

    // ========== Catalog Errors ==========
    /// No catalog client could be constructed at startup
    #[error("YouTube Music API not initialized")]
    NotReady,

    /// Catalog call failed
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidBody(_) | Self::NotReady | Self::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short code used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NotReady => "NOT_READY",
            Self::Upstream(_) => "UPSTREAM_ERROR",
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

// ========== Conversion Implementations ==========

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self::Upstream(err.to_string())
    }
}
