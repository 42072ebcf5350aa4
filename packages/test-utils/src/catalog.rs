//! Mock catalog server for testing the catalog client and gateway
//!
//! Provides a [`MockCatalogServer`] that simulates the catalog service's JSON
//! endpoints, plus fixtures that render the loosely-structured payloads the
//! real service returns (camelCase keys, optional fields left out).

use serde_json::{json, Map, Value};
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Mock catalog service
///
/// # Example
///
/// ```rust,ignore
/// use tunebridge_test_utils::{MockCatalogServer, TrackFixture};
///
/// #[tokio::test]
/// async fn test_search() {
///     let server = MockCatalogServer::start().await;
///     server
///         .mock_search("Wonderwall", vec![TrackFixture::new("abc", "Wonderwall").artist("Oasis")])
///         .await;
///
///     // Point the catalog client at server.url()
/// }
/// ```
pub struct MockCatalogServer {
    server: MockServer,
}

impl MockCatalogServer {
    /// Start a new mock catalog server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Access the underlying wiremock server for custom mocks
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Requests received so far
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Mount a search response for a specific query
    pub async fn mock_search(&self, query: &str, tracks: Vec<TrackFixture>) {
        let body: Vec<Value> = tracks.iter().map(TrackFixture::to_json).collect();

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a search response with a raw JSON body for any query
    pub async fn mock_search_raw(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a song lookup response
    pub async fn mock_song(&self, video_id: &str, song: SongFixture) {
        Mock::given(method("GET"))
            .and(path(format!("/songs/{}", video_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(song.to_json()))
            .mount(&self.server)
            .await;
    }

    /// Mount a 404 for a song lookup
    pub async fn mock_song_not_found(&self, video_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/songs/{}", video_id)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "Song not found"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount the library playlist listing for requests carrying `authorization`
    pub async fn mock_library_playlists(&self, authorization: &str, playlists: Vec<PlaylistFixture>) {
        let body: Vec<Value> = playlists.iter().map(PlaylistFixture::to_json).collect();

        Mock::given(method("GET"))
            .and(path("/library/playlists"))
            .and(header("authorization", authorization))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a playlist detail response
    pub async fn mock_playlist(&self, playlist_id: &str, playlist: PlaylistDetailFixture) {
        Mock::given(method("GET"))
            .and(path(format!("/playlists/{}", playlist_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(playlist.to_json()))
            .mount(&self.server)
            .await;
    }

    /// Mount a 404 for a playlist lookup
    pub async fn mock_playlist_not_found(&self, playlist_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/playlists/{}", playlist_id)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "Playlist not found"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount an error status for every catalog endpoint
    pub async fn mock_server_error(&self, status_code: u16, error_message: &str) {
        Mock::given(method("GET"))
            .and(path_regex("^/(search|songs|library|playlists)"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "error": error_message
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a 401 for every catalog endpoint
    pub async fn mock_unauthorized(&self, error_message: &str) {
        self.mock_server_error(401, error_message).await;
    }

    /// Mount rate limiting for every catalog endpoint
    pub async fn mock_rate_limit(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "60"))
            .mount(&self.server)
            .await;
    }
}

/// Render a thumbnail list the way the catalog does: smallest first
fn thumbnails_json(urls: &[String]) -> Value {
    Value::Array(
        urls.iter()
            .enumerate()
            .map(|(i, url)| {
                let size = 60 * (i as u32 + 1);
                json!({ "url": url, "width": size, "height": size })
            })
            .collect(),
    )
}

/// Fixture for catalog track payloads
#[derive(Debug, Clone, Default)]
pub struct TrackFixture {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub artists: Option<Vec<String>>,
    pub duration: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

impl TrackFixture {
    /// Track with an id and title and nothing else
    pub fn new(video_id: &str, title: &str) -> Self {
        Self {
            video_id: Some(video_id.to_string()),
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Track lacking an identifier (e.g. an unavailable upload)
    pub fn without_id(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Add an artist credit
    pub fn artist(mut self, name: &str) -> Self {
        self.artists
            .get_or_insert_with(Vec::new)
            .push(name.to_string());
        self
    }

    /// Set the display duration ("4:18")
    pub fn duration(mut self, duration: &str) -> Self {
        self.duration = Some(duration.to_string());
        self
    }

    /// Add a thumbnail, larger than any added before
    pub fn thumbnail(mut self, url: &str) -> Self {
        self.thumbnails
            .get_or_insert_with(Vec::new)
            .push(url.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut fields = Map::new();
        if let Some(id) = &self.video_id {
            fields.insert("videoId".into(), json!(id));
        }
        if let Some(title) = &self.title {
            fields.insert("title".into(), json!(title));
        }
        if let Some(artists) = &self.artists {
            let artists: Vec<Value> = artists.iter().map(|name| json!({ "name": name })).collect();
            fields.insert("artists".into(), Value::Array(artists));
        }
        if let Some(duration) = &self.duration {
            fields.insert("duration".into(), json!(duration));
        }
        if let Some(thumbnails) = &self.thumbnails {
            fields.insert("thumbnails".into(), thumbnails_json(thumbnails));
        }
        Value::Object(fields)
    }
}

/// Fixture for library playlist payloads
#[derive(Debug, Clone, Default)]
pub struct PlaylistFixture {
    pub playlist_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub count: Option<Value>,
    pub thumbnails: Option<Vec<String>>,
}

impl PlaylistFixture {
    pub fn new(playlist_id: &str, title: &str) -> Self {
        Self {
            playlist_id: Some(playlist_id.to_string()),
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Count as a JSON number
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(json!(count));
        self
    }

    /// Count as text, which some catalog endpoints return
    pub fn count_text(mut self, count: &str) -> Self {
        self.count = Some(json!(count));
        self
    }

    pub fn thumbnail(mut self, url: &str) -> Self {
        self.thumbnails
            .get_or_insert_with(Vec::new)
            .push(url.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut fields = Map::new();
        if let Some(id) = &self.playlist_id {
            fields.insert("playlistId".into(), json!(id));
        }
        if let Some(title) = &self.title {
            fields.insert("title".into(), json!(title));
        }
        if let Some(description) = &self.description {
            fields.insert("description".into(), json!(description));
        }
        if let Some(count) = &self.count {
            fields.insert("count".into(), count.clone());
        }
        if let Some(thumbnails) = &self.thumbnails {
            fields.insert("thumbnails".into(), thumbnails_json(thumbnails));
        }
        Value::Object(fields)
    }
}

/// Fixture for playlist detail payloads
#[derive(Debug, Clone, Default)]
pub struct PlaylistDetailFixture {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tracks: Vec<TrackFixture>,
}

impl PlaylistDetailFixture {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn track(mut self, track: TrackFixture) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn to_json(&self) -> Value {
        let mut fields = Map::new();
        if let Some(title) = &self.title {
            fields.insert("title".into(), json!(title));
        }
        if let Some(description) = &self.description {
            fields.insert("description".into(), json!(description));
        }
        fields.insert("trackCount".into(), json!(self.tracks.len()));
        fields.insert(
            "tracks".into(),
            Value::Array(self.tracks.iter().map(TrackFixture::to_json).collect()),
        );
        Value::Object(fields)
    }
}

/// Fixture for song lookup payloads
#[derive(Debug, Clone, Default)]
pub struct SongFixture {
    pub title: Option<String>,
    pub author: Option<String>,
    pub length_seconds: Option<String>,
}

impl SongFixture {
    pub fn new(title: &str, author: &str, length_seconds: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            length_seconds: Some(length_seconds.to_string()),
        }
    }

    /// Payload without a `videoDetails` object
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Value {
        if self.title.is_none() && self.author.is_none() && self.length_seconds.is_none() {
            return json!({ "playabilityStatus": { "status": "OK" } });
        }

        let mut details = Map::new();
        if let Some(title) = &self.title {
            details.insert("title".into(), json!(title));
        }
        if let Some(author) = &self.author {
            details.insert("author".into(), json!(author));
        }
        if let Some(length) = &self.length_seconds {
            details.insert("lengthSeconds".into(), json!(length));
        }
        json!({ "videoDetails": Value::Object(details) })
    }
}
