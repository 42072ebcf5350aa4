//! Playlist models returned to the voice skill

use serde::{Deserialize, Serialize};

use super::Track;

/// Playlist summary from the user's library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub playlist_id: String,
    pub title: String,
    pub description: String,
    /// Track count reported by the catalog
    pub count: u64,
    pub thumbnail: String,
}

/// Playlist with its playable tracks
///
/// `count` is the number of tracks in `songs`, which can be lower than the
/// catalog's own count when unplayable entries were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub playlist_id: String,
    pub title: String,
    pub description: String,
    pub songs: Vec<Track>,
    pub count: usize,
}

/// Library playlist listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsResponse {
    pub playlists: Vec<Playlist>,
    pub count: usize,
}

impl PlaylistsResponse {
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self {
            count: playlists.len(),
            playlists,
        }
    }
}
