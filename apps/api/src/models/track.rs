//! Track and song models returned to the voice skill

use serde::{Deserialize, Serialize};

/// A playable track, fully defaulted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog video identifier, never empty
    pub video_id: String,
    pub title: String,
    /// Comma-joined artist names
    pub artist: String,
    /// Display duration as given by the catalog ("4:18")
    pub duration: String,
    /// Largest thumbnail URL, or empty
    pub thumbnail: String,
    pub stream_url: String,
}

/// Details for a single song lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetail {
    pub video_id: String,
    pub title: String,
    pub artist: String,
    /// Length in seconds, as text
    pub duration: String,
    pub stream_url: String,
}

/// Search results for a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<Track>,
    pub count: usize,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, results: Vec<Track>) -> Self {
        Self {
            query: query.into(),
            count: results.len(),
            results,
        }
    }
}
