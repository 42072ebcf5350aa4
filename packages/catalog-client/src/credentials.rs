//! Credential bundle loading
//!
//! The bundle is produced once by the interactive setup wizard and read at
//! startup. Two shapes are accepted:
//! - an OAuth token object (`access_token`, optional `token_type`)
//! - a map of browser request headers (`cookie`, `x-goog-authuser`, ...)
//!
//! Either way the result is a set of headers attached to every catalog request.

use std::fmt;
use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};

/// How the bundle authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// OAuth access token sent as `Authorization`
    OAuth,
    /// Captured browser headers sent verbatim
    Browser,
}

/// Parsed credential bundle
#[derive(Clone)]
pub struct CredentialBundle {
    kind: CredentialKind,
    headers: HeaderMap,
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.headers.keys().map(HeaderName::as_str).collect();
        f.debug_struct("CredentialBundle")
            .field("kind", &self.kind)
            .field("headers", &names)
            .field("values", &"[REDACTED]")
            .finish()
    }
}

impl CredentialBundle {
    /// Read and parse a bundle from disk
    ///
    /// # Errors
    /// - `CatalogError::CredentialsIo` if the file cannot be read
    /// - `CatalogError::InvalidCredentials` if it is not JSON or has no usable credentials
    pub fn load(path: &Path) -> CatalogResult<Self> {
        debug!(path = %path.display(), "Loading credential bundle");
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a bundle from its JSON text
    pub fn from_json(text: &str) -> CatalogResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CatalogError::InvalidCredentials(format!("not valid JSON: {}", e)))?;
        let Value::Object(fields) = value else {
            return Err(CatalogError::InvalidCredentials(
                "expected a JSON object".to_string(),
            ));
        };

        if fields.contains_key("access_token") {
            Self::from_oauth(&fields)
        } else {
            Self::from_browser_headers(&fields)
        }
    }

    fn from_oauth(fields: &Map<String, Value>) -> CatalogResult<Self> {
        let token = fields
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                CatalogError::InvalidCredentials("access_token must be a non-empty string".into())
            })?;
        let token_type = fields
            .get("token_type")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or("Bearer");

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            sensitive_value(&format!("{} {}", token_type, token))?,
        );

        Ok(Self {
            kind: CredentialKind::OAuth,
            headers,
        })
    }

    fn from_browser_headers(fields: &Map<String, Value>) -> CatalogResult<Self> {
        let mut headers = HeaderMap::new();

        for (name, value) in fields {
            let Some(value) = value.as_str() else {
                warn!(header = %name, "Skipping non-string credential header");
                continue;
            };
            let name = HeaderName::from_bytes(name.to_ascii_lowercase().as_bytes())
                .map_err(|e| {
                    CatalogError::InvalidCredentials(format!("invalid header name '{}': {}", name, e))
                })?;
            headers.insert(name, sensitive_value(value)?);
        }

        if headers.is_empty() {
            return Err(CatalogError::InvalidCredentials(
                "bundle contains no usable headers".to_string(),
            ));
        }

        Ok(Self {
            kind: CredentialKind::Browser,
            headers,
        })
    }

    /// How this bundle authenticates
    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    /// Headers to attach to every catalog request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn sensitive_value(value: &str) -> CatalogResult<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|e| {
        CatalogError::InvalidCredentials(format!("invalid header value: {}", e))
    })?;
    header.set_sensitive(true);
    Ok(header)
}
