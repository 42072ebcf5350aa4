//! Catalog client capability and its HTTP implementation

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use tunebridge_shared_config::CatalogConfig;
use url::Url;

use crate::credentials::CredentialBundle;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{RawPlaylist, RawPlaylistDetail, RawSongDetails, RawTrack, SearchFilter};

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Base delay for exponential backoff (milliseconds)
const RETRY_BASE_DELAY_MS: u64 = 100;

/// Upper bound for a single backoff delay (milliseconds)
const MAX_RETRY_DELAY_MS: u64 = 5_000;

/// Maximum identifier / query length accepted before hitting the network
const MAX_INPUT_LENGTH: usize = 512;

/// Maximum error body size kept in error messages
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Operations the gateway needs from a music catalog.
///
/// Implementations may be anonymous (search and lookups only) or
/// authenticated (adds the user's library). `None` from a lookup means the
/// catalog has no such entity.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search the catalog, returning at most `limit` results
    async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
        limit: u32,
    ) -> CatalogResult<Vec<RawTrack>>;

    /// Look up a single song by video id
    async fn get_song(&self, video_id: &str) -> CatalogResult<Option<RawSongDetails>>;

    /// List playlists saved in the user's library
    async fn list_playlists(&self, limit: u32) -> CatalogResult<Vec<RawPlaylist>>;

    /// Fetch a playlist with up to `limit` tracks
    async fn get_playlist(
        &self,
        playlist_id: &str,
        limit: u32,
    ) -> CatalogResult<Option<RawPlaylistDetail>>;

    /// Whether requests carry user credentials
    fn is_authenticated(&self) -> bool;
}

/// Catalog client speaking the catalog service's JSON REST API
#[derive(Clone)]
pub struct HttpCatalogClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<CredentialBundle>,
    max_retries: u32,
}

impl fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.credentials.is_some())
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl HttpCatalogClient {
    /// Create a client without user credentials
    ///
    /// # Errors
    /// - `CatalogError::InvalidUrl` if the configured URL does not parse
    /// - `CatalogError::Http` if the HTTP client cannot be built
    pub fn anonymous(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::build(config, None)
    }

    /// Create a client that sends the bundle's headers with every request
    pub fn authenticated(
        config: &CatalogConfig,
        credentials: CredentialBundle,
    ) -> CatalogResult<Self> {
        Self::build(config, Some(credentials))
    }

    fn build(config: &CatalogConfig, credentials: Option<CredentialBundle>) -> CatalogResult<Self> {
        let base_url = Url::parse(&config.url)?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidInput(format!(
                "catalog URL '{}' cannot be used as a base",
                config.url
            )));
        }

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("tunebridge/", env!("CARGO_PKG_VERSION")));

        if let Some(bundle) = &credentials {
            builder = builder.default_headers(bundle.headers().clone());
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url,
            credentials,
            max_retries: config.max_retries,
        })
    }

    /// Bound a caller-supplied string. The value is passed on exactly as given.
    fn validate_input<'a>(field: &str, value: &'a str) -> CatalogResult<&'a str> {
        if value.is_empty() {
            return Err(CatalogError::InvalidInput(format!("{} cannot be empty", field)));
        }
        if value.len() > MAX_INPUT_LENGTH {
            return Err(CatalogError::InvalidInput(format!(
                "{} too long (max {} characters)",
                field, MAX_INPUT_LENGTH
            )));
        }
        Ok(value)
    }

    /// Build an endpoint URL, percent-encoding each path segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Execute an operation with retry logic for transient failures
    async fn with_retry<T, F, Fut>(&self, operation: F) -> CatalogResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = CatalogResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay_ms = retry_delay_ms(attempt);
                    warn!(
                        attempt = attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Catalog request failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// GET an endpoint, returning the body text or `None` for 404
    async fn fetch(&self, url: &Url, query: &[(&str, String)]) -> CatalogResult<Option<String>> {
        let response = self
            .http_client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Timeout
                } else {
                    CatalogError::Http(e)
                }
            })?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Catalog API rate limited");
                return Err(CatalogError::RateLimited);
            }
            _ => {}
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout
            } else {
                CatalogError::Http(e)
            }
        })?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized(error_message(body)));
        }
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: error_message(body),
            });
        }

        Ok(Some(body))
    }

    /// Fetch and decode an optional entity; 404 and a `null` body both mean absent
    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        url: Url,
        query: Vec<(&str, String)>,
    ) -> CatalogResult<Option<T>> {
        let body = self.with_retry(|| self.fetch(&url, &query)).await?;
        match body {
            Some(text) if !text.trim().is_empty() => Ok(serde_json::from_str(&text)?),
            _ => Ok(None),
        }
    }

    /// Fetch and decode a list; a `null` body is an empty list, 404 is an error
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        url: Url,
        query: Vec<(&str, String)>,
    ) -> CatalogResult<Vec<T>> {
        let body = self
            .with_retry(|| self.fetch(&url, &query))
            .await?
            .ok_or_else(|| CatalogError::Api {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: format!("endpoint {} not found", url.path()),
            })?;

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Option<Vec<T>> = serde_json::from_str(&body)?;
        Ok(items.unwrap_or_default())
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
        limit: u32,
    ) -> CatalogResult<Vec<RawTrack>> {
        let query = Self::validate_input("query", query)?;

        debug!(query = %query, filter = %filter, limit, "Searching catalog");

        let tracks: Vec<RawTrack> = self
            .fetch_list(
                self.endpoint(&["search"]),
                vec![
                    ("query", query.to_string()),
                    ("filter", filter.as_str().to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        debug!(query = %query, result_count = tracks.len(), "Catalog search complete");
        Ok(tracks)
    }

    #[instrument(skip(self))]
    async fn get_song(&self, video_id: &str) -> CatalogResult<Option<RawSongDetails>> {
        let video_id = Self::validate_input("video_id", video_id)?;
        self.fetch_optional(self.endpoint(&["songs", video_id]), Vec::new())
            .await
    }

    #[instrument(skip(self))]
    async fn list_playlists(&self, limit: u32) -> CatalogResult<Vec<RawPlaylist>> {
        if self.credentials.is_none() {
            return Err(CatalogError::AuthenticationRequired);
        }

        let playlists: Vec<RawPlaylist> = self
            .fetch_list(
                self.endpoint(&["library", "playlists"]),
                vec![("limit", limit.to_string())],
            )
            .await?;

        debug!(playlist_count = playlists.len(), "Fetched library playlists");
        Ok(playlists)
    }

    #[instrument(skip(self))]
    async fn get_playlist(
        &self,
        playlist_id: &str,
        limit: u32,
    ) -> CatalogResult<Option<RawPlaylistDetail>> {
        let playlist_id = Self::validate_input("playlist_id", playlist_id)?;
        self.fetch_optional(
            self.endpoint(&["playlists", playlist_id]),
            vec![("limit", limit.to_string())],
        )
        .await
    }

    fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Pull a readable message out of an error body
fn error_message(body: String) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(&body) {
        let message = fields
            .get("error")
            .or_else(|| fields.get("message"))
            .and_then(serde_json::Value::as_str);
        if let Some(message) = message {
            return message.to_string();
        }
    }
    truncate_error_body(body)
}

/// Truncate on a UTF-8 boundary so huge HTML error pages stay out of logs
fn truncate_error_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_SIZE {
        return body;
    }
    let truncate_at = body
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= MAX_ERROR_BODY_SIZE)
        .last()
        .unwrap_or(0);
    format!("{}... (truncated)", &body[..truncate_at])
}

/// Exponential backoff for the given attempt, capped at [`MAX_RETRY_DELAY_MS`]
fn retry_delay_ms(attempt: u32) -> u64 {
    2u64.checked_pow(attempt)
        .and_then(|factor| RETRY_BASE_DELAY_MS.checked_mul(factor))
        .map_or(MAX_RETRY_DELAY_MS, |delay| delay.min(MAX_RETRY_DELAY_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpCatalogClient {
        HttpCatalogClient::anonymous(&CatalogConfig::with_url("http://catalog.test:9000/"))
            .unwrap()
    }

    #[test]
    fn test_anonymous_client_is_not_authenticated() {
        assert!(!client().is_authenticated());
    }

    #[test]
    fn test_authenticated_client() {
        let bundle = CredentialBundle::from_json(r#"{"access_token": "t"}"#).unwrap();
        let client = HttpCatalogClient::authenticated(
            &CatalogConfig::with_url("http://catalog.test"),
            bundle,
        )
        .unwrap();
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let result = HttpCatalogClient::anonymous(&CatalogConfig::with_url("::nope"));
        assert!(matches!(result, Err(CatalogError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_non_base_url() {
        let result = HttpCatalogClient::anonymous(&CatalogConfig::with_url("mailto:me@example.com"));
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let bundle = CredentialBundle::from_json(r#"{"access_token": "secret"}"#).unwrap();
        let client = HttpCatalogClient::authenticated(
            &CatalogConfig::with_url("http://catalog.test"),
            bundle,
        )
        .unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret"));
        assert!(debug_str.contains("authenticated: true"));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = client().endpoint(&["playlists", "PL a/b"]);
        assert_eq!(url.as_str(), "http://catalog.test:9000/playlists/PL%20a%2Fb");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client =
            HttpCatalogClient::anonymous(&CatalogConfig::with_url("http://catalog.test/api"))
                .unwrap();
        let url = client.endpoint(&["search"]);
        assert_eq!(url.as_str(), "http://catalog.test/api/search");
    }

    #[test]
    fn test_retry_delay_is_capped() {
        assert_eq!(retry_delay_ms(1), 200);
        assert_eq!(retry_delay_ms(3), 800);
        assert_eq!(retry_delay_ms(6), MAX_RETRY_DELAY_MS);
        assert_eq!(retry_delay_ms(20), MAX_RETRY_DELAY_MS);
        assert_eq!(retry_delay_ms(200), MAX_RETRY_DELAY_MS);
    }

    #[test]
    fn test_validate_input() {
        assert!(matches!(
            HttpCatalogClient::validate_input("query", ""),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(matches!(
            HttpCatalogClient::validate_input("query", &"a".repeat(MAX_INPUT_LENGTH + 1)),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(matches!(
            HttpCatalogClient::validate_input("query", "  Oasis "),
            Ok("  Oasis ")
        ));
    }

    #[test]
    fn test_error_message_prefers_json_fields() {
        assert_eq!(
            error_message(r#"{"error": "quota exceeded"}"#.to_string()),
            "quota exceeded"
        );
        assert_eq!(
            error_message(r#"{"message": "bad gateway"}"#.to_string()),
            "bad gateway"
        );
        assert_eq!(error_message("plain text".to_string()), "plain text");
    }

    #[test]
    fn test_truncate_error_body_respects_char_boundaries() {
        let body = "é".repeat(MAX_ERROR_BODY_SIZE);
        let truncated = truncate_error_body(body);
        assert!(truncated.ends_with("... (truncated)"));
        assert!(truncated.len() < MAX_ERROR_BODY_SIZE + 20);
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(CatalogError::Timeout.is_retryable());
        assert!(CatalogError::RateLimited.is_retryable());
        assert!(CatalogError::Api {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(!CatalogError::Api {
            status: 400,
            message: String::new()
        }
        .is_retryable());
        assert!(!CatalogError::AuthenticationRequired.is_retryable());
        assert!(!CatalogError::Unauthorized("expired".into()).is_retryable());
    }
}
