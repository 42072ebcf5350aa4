//! Raw catalog records to voice-skill records
//!
//! Catalog payloads leave any field out whenever they like. All defaulting
//! happens here so handlers only ever see complete records.

use tunebridge_catalog_client::{
    RawArtist, RawPlaylist, RawPlaylistDetail, RawSongDetails, RawThumbnail, RawTrack,
};

use crate::models::{Playlist, PlaylistDetail, SongDetail, Track};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_DURATION: &str = "Unknown";
pub const UNKNOWN_PLAYLIST: &str = "Unknown Playlist";
const UNKNOWN: &str = "Unknown";
const ZERO_SECONDS: &str = "0";

/// Tracks kept from a playlist
pub const PLAYLIST_TRACK_LIMIT: usize = 100;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Canonical watch URL for a video id
pub fn stream_url(video_id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(video_id.as_bytes()).collect();
    format!("{}{}", WATCH_URL, encoded)
}

/// Names joined with ", ". Credits without a name are skipped.
fn join_artists(artists: Option<&[RawArtist]>) -> String {
    let names: Vec<&str> = artists
        .unwrap_or_default()
        .iter()
        .filter_map(|artist| artist.name.as_deref())
        .collect();

    if names.is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        names.join(", ")
    }
}

/// URL of the last (largest) thumbnail
fn last_thumbnail(thumbnails: Option<&[RawThumbnail]>) -> String {
    thumbnails
        .and_then(<[RawThumbnail]>::last)
        .and_then(|thumb| thumb.url.clone())
        .unwrap_or_default()
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}

/// Normalize a track. Returns `None` when it has no usable identifier.
pub fn to_track(raw: &RawTrack) -> Option<Track> {
    let video_id = raw.video_id.as_deref().filter(|id| !id.is_empty())?;

    Some(Track {
        video_id: video_id.to_string(),
        title: or_default(raw.title.as_deref(), UNKNOWN_TITLE),
        artist: join_artists(raw.artists.as_deref()),
        duration: or_default(raw.duration.as_deref(), UNKNOWN_DURATION),
        thumbnail: last_thumbnail(raw.thumbnails.as_deref()),
        stream_url: stream_url(video_id),
    })
}

/// Normalize up to `limit` raw tracks, dropping those without an identifier
pub fn to_tracks(raws: &[RawTrack], limit: usize) -> Vec<Track> {
    raws.iter().take(limit).filter_map(to_track).collect()
}

pub fn to_playlist(raw: &RawPlaylist) -> Playlist {
    Playlist {
        playlist_id: raw.playlist_id.clone().unwrap_or_default(),
        title: or_default(raw.title.as_deref(), UNKNOWN_PLAYLIST),
        description: raw.description.clone().unwrap_or_default(),
        count: raw.count.unwrap_or(0),
        thumbnail: last_thumbnail(raw.thumbnails.as_deref()),
    }
}

/// Normalize a playlist with its tracks. The requested id is echoed back.
pub fn to_playlist_detail(raw: &RawPlaylistDetail, playlist_id: &str) -> PlaylistDetail {
    let songs = to_tracks(raw.tracks.as_deref().unwrap_or_default(), PLAYLIST_TRACK_LIMIT);

    PlaylistDetail {
        playlist_id: playlist_id.to_string(),
        title: or_default(raw.title.as_deref(), UNKNOWN_PLAYLIST),
        description: raw.description.clone().unwrap_or_default(),
        count: songs.len(),
        songs,
    }
}

/// Normalize a song lookup. A payload without `videoDetails` yields all defaults.
pub fn to_song_detail(raw: Option<&RawSongDetails>, video_id: &str) -> SongDetail {
    let details = raw.and_then(|song| song.video_details.as_ref());

    SongDetail {
        video_id: video_id.to_string(),
        title: or_default(details.and_then(|d| d.title.as_deref()), UNKNOWN),
        artist: or_default(details.and_then(|d| d.author.as_deref()), UNKNOWN),
        duration: or_default(
            details.and_then(|d| d.length_seconds.as_deref()),
            ZERO_SECONDS,
        ),
        stream_url: stream_url(video_id),
    }
}
