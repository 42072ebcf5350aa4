//! API server configuration

use std::env;

use anyhow::{Context, Result};
use tunebridge_shared_config::{CatalogConfig, CommonConfig, Environment};

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// CORS allowed origins; `None` allows any origin
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Fails when `PORT` is not a valid port number or when the catalog
    /// settings do not parse.
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env().context("Failed to load catalog configuration")?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            cors_allowed_origins: env::var("CORS_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|origins| !origins.is_empty()),
        })
    }

    /// Get catalog configuration
    pub fn catalog(&self) -> &CatalogConfig {
        &self.common.catalog
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }
}
