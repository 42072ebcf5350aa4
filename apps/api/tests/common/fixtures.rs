//! Test fixtures for API integration tests
//!
//! [`StubCatalog`] is an in-memory [`CatalogClient`] with canned responses
//! and a log of the calls it received.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use tunebridge_catalog_client::{
    CatalogClient, CatalogError, CatalogResult, RawArtist, RawPlaylist, RawPlaylistDetail,
    RawSongDetails, RawThumbnail, RawTrack, RawVideoDetails, SearchFilter,
};

/// A call received by the stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubCall {
    Search {
        query: String,
        filter: SearchFilter,
        limit: u32,
    },
    GetSong(String),
    ListPlaylists(u32),
    GetPlaylist(String, u32),
}

/// In-memory catalog client
#[derive(Debug, Default)]
pub struct StubCatalog {
    authenticated: bool,
    tracks: Vec<RawTrack>,
    song: Option<RawSongDetails>,
    playlists: Vec<RawPlaylist>,
    playlist: Option<RawPlaylistDetail>,
    failure: Option<String>,
    library_failure: Option<String>,
    calls: Mutex<Vec<StubCall>>,
}

impl StubCatalog {
    /// Anonymous stub returning empty results
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    pub fn with_tracks(mut self, tracks: Vec<RawTrack>) -> Self {
        self.tracks = tracks;
        self
    }

    pub fn with_song(mut self, song: RawSongDetails) -> Self {
        self.song = Some(song);
        self
    }

    pub fn with_playlists(mut self, playlists: Vec<RawPlaylist>) -> Self {
        self.playlists = playlists;
        self
    }

    pub fn with_playlist(mut self, playlist: RawPlaylistDetail) -> Self {
        self.playlist = Some(playlist);
        self
    }

    /// Every call fails with a 502 carrying `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Library listing is rejected with `message`
    pub fn library_denied(mut self, message: &str) -> Self {
        self.library_failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<StubCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StubCall) -> CatalogResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(message) => Err(CatalogError::Api {
                status: 502,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
        limit: u32,
    ) -> CatalogResult<Vec<RawTrack>> {
        self.record(StubCall::Search {
            query: query.to_string(),
            filter,
            limit,
        })?;
        Ok(self.tracks.clone())
    }

    async fn get_song(&self, video_id: &str) -> CatalogResult<Option<RawSongDetails>> {
        self.record(StubCall::GetSong(video_id.to_string()))?;
        Ok(self.song.clone())
    }

    async fn list_playlists(&self, limit: u32) -> CatalogResult<Vec<RawPlaylist>> {
        if !self.authenticated {
            return Err(CatalogError::AuthenticationRequired);
        }
        self.record(StubCall::ListPlaylists(limit))?;
        if let Some(message) = &self.library_failure {
            return Err(CatalogError::Unauthorized(message.clone()));
        }
        Ok(self.playlists.clone())
    }

    async fn get_playlist(
        &self,
        playlist_id: &str,
        limit: u32,
    ) -> CatalogResult<Option<RawPlaylistDetail>> {
        self.record(StubCall::GetPlaylist(playlist_id.to_string(), limit))?;
        Ok(self.playlist.clone())
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

// ========== Raw record builders ==========

pub fn raw_track(video_id: &str, title: &str, artists: &[&str]) -> RawTrack {
    RawTrack {
        video_id: Some(video_id.to_string()),
        title: Some(title.to_string()),
        artists: Some(
            artists
                .iter()
                .map(|name| RawArtist {
                    name: Some(name.to_string()),
                    id: None,
                })
                .collect(),
        ),
        ..RawTrack::default()
    }
}

/// Track without an identifier
pub fn raw_track_without_id(title: &str) -> RawTrack {
    RawTrack {
        title: Some(title.to_string()),
        ..RawTrack::default()
    }
}

/// Tracks "t0", "t1", ... with no other fields
pub fn numbered_tracks(count: usize) -> Vec<RawTrack> {
    (0..count)
        .map(|i| RawTrack {
            video_id: Some(format!("t{}", i)),
            ..RawTrack::default()
        })
        .collect()
}

pub fn thumbnail(url: &str) -> RawThumbnail {
    RawThumbnail {
        url: Some(url.to_string()),
        width: None,
        height: None,
    }
}

pub fn raw_playlist(playlist_id: &str, title: &str, count: u64) -> RawPlaylist {
    RawPlaylist {
        playlist_id: Some(playlist_id.to_string()),
        title: Some(title.to_string()),
        count: Some(count),
        ..RawPlaylist::default()
    }
}

pub fn raw_playlist_detail(title: &str, tracks: Vec<RawTrack>) -> RawPlaylistDetail {
    RawPlaylistDetail {
        title: Some(title.to_string()),
        track_count: Some(tracks.len() as u64),
        tracks: Some(tracks),
        ..RawPlaylistDetail::default()
    }
}

pub fn raw_song(title: &str, author: &str, length_seconds: &str) -> RawSongDetails {
    RawSongDetails {
        video_details: Some(RawVideoDetails {
            video_id: None,
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            length_seconds: Some(length_seconds.to_string()),
        }),
    }
}
