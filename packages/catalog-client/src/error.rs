//! Catalog client error types

use thiserror::Error;

/// Catalog client errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Invalid input provided to a catalog operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catalog base URL could not be parsed
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Credential bundle could not be read
    #[error("Failed to read credential bundle: {0}")]
    CredentialsIo(#[from] std::io::Error),

    /// Credential bundle was readable but unusable
    #[error("Invalid credential bundle: {0}")]
    InvalidCredentials(String),

    /// Operation needs an authenticated client
    #[error("Please provide authentication before using this function")]
    AuthenticationRequired,

    /// Catalog rejected the credentials
    #[error("Catalog rejected credentials: {0}")]
    Unauthorized(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog returned an unexpected status
    #[error("Catalog API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the catalog
    #[error("Rate limited by catalog API")]
    RateLimited,

    /// Request timeout
    #[error("Request to catalog timed out")]
    Timeout,
}

impl CatalogError {
    /// Check if this error is retryable (transient failure)
    ///
    /// Retries on timeouts, rate limiting, transport errors and 5xx responses.
    /// Client errors and credential problems are returned immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Timeout | CatalogError::RateLimited => true,
            CatalogError::Api { status, .. } => *status >= 500,
            CatalogError::Http(e) => {
                if e.is_timeout() || e.is_connect() {
                    return true;
                }
                matches!(e.status(), Some(status) if status.is_server_error())
            }
            _ => false,
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
