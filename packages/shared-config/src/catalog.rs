//! Catalog service configuration types

use std::path::PathBuf;

use crate::{get_env_or_default, parse_env, ConfigError, ConfigResult};

const DEFAULT_CATALOG_URL: &str = "http://localhost:9000";
const DEFAULT_CREDENTIALS_PATH: &str = "oauth.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Remote music catalog configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog service base URL
    pub url: String,

    /// Path to the credential bundle produced by the setup wizard.
    /// The file is optional; without it the catalog is used anonymously.
    pub credentials_path: PathBuf,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Retry attempts for transient failures
    pub max_retries: u32,
}

impl CatalogConfig {
    /// Load catalog configuration from environment variables
    ///
    /// # Errors
    /// - `ConfigError::InvalidUrl` if `CATALOG_API_URL` is not an absolute http(s) URL
    /// - `ConfigError::InvalidValue` if a numeric variable does not parse
    pub fn from_env() -> ConfigResult<Self> {
        let url = get_env_or_default("CATALOG_API_URL", DEFAULT_CATALOG_URL);
        Self::validate_url(&url)?;

        Ok(Self {
            url,
            credentials_path: PathBuf::from(get_env_or_default(
                "CATALOG_CREDENTIALS_PATH",
                DEFAULT_CREDENTIALS_PATH,
            )),
            timeout_secs: parse_env("CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            max_retries: parse_env("CATALOG_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
        })
    }

    /// Create a configuration with a custom URL (useful for testing)
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    fn validate_url(url: &str) -> ConfigResult<()> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ConfigError::InvalidUrl("CATALOG_API_URL".to_string(), e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidUrl(
                "CATALOG_API_URL".to_string(),
                format!("unsupported scheme '{}'", other),
            )),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}
