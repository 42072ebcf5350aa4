//! Raw catalog response models
//!
//! Catalog payloads are loosely structured: any field may be missing, and a few
//! numeric fields arrive as strings depending on the endpoint. Every field is
//! therefore optional here; turning these into strict records is the caller's
//! job.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Result category for catalog searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFilter {
    #[default]
    Songs,
    Videos,
    Albums,
    Artists,
    Playlists,
}

impl SearchFilter {
    /// Wire name of the filter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Songs => "songs",
            Self::Videos => "videos",
            Self::Albums => "albums",
            Self::Artists => "artists",
            Self::Playlists => "playlists",
        }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artist credit attached to a track
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawArtist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Thumbnail entry. Catalog lists are ordered smallest to largest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawThumbnail {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Track as returned by search and playlist endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrack {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artists: Option<Vec<RawArtist>>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub thumbnails: Option<Vec<RawThumbnail>>,
}

/// Playlist summary from the user's library
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlaylist {
    #[serde(default)]
    pub playlist_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: Option<u64>,
    #[serde(default)]
    pub thumbnails: Option<Vec<RawThumbnail>>,
}

/// Full playlist including its tracks
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlaylistDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub track_count: Option<u64>,
    #[serde(default)]
    pub thumbnails: Option<Vec<RawThumbnail>>,
    #[serde(default)]
    pub tracks: Option<Vec<RawTrack>>,
}

/// Song lookup payload; the interesting fields are nested in `videoDetails`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSongDetails {
    #[serde(default)]
    pub video_details: Option<RawVideoDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoDetails {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub length_seconds: Option<String>,
}

/// Accept counts as numbers or numeric strings ("1,204").
/// Anything else is treated as missing rather than failing the whole payload.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => {
            let digits: String = s.chars().filter(|c| *c != ',').collect();
            match digits.trim().parse() {
                Ok(count) => Some(count),
                Err(e) => {
                    tracing::warn!(raw_count = %s, error = %e, "Unparseable count, treating as missing");
                    None
                }
            }
        }
        _ => None,
    })
}

/// Accept strings or numbers, normalizing numbers to their decimal text
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_track_with_missing_fields() {
        let track: RawTrack = serde_json::from_value(json!({ "videoId": "abc" })).unwrap();
        assert_eq!(track.video_id.as_deref(), Some("abc"));
        assert!(track.title.is_none());
        assert!(track.artists.is_none());
        assert!(track.thumbnails.is_none());
    }

    #[test]
    fn test_track_null_fields_are_missing() {
        let track: RawTrack = serde_json::from_value(json!({
            "videoId": null,
            "title": "Wonderwall",
            "duration": null
        }))
        .unwrap();
        assert!(track.video_id.is_none());
        assert!(track.duration.is_none());
    }

    #[test]
    fn test_track_ignores_unknown_fields() {
        let track: RawTrack = serde_json::from_value(json!({
            "videoId": "abc",
            "album": { "name": "(What's the Story) Morning Glory?" },
            "isExplicit": false
        }))
        .unwrap();
        assert_eq!(track.video_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_playlist_count_as_number_or_string() {
        let numeric: RawPlaylist = serde_json::from_value(json!({ "count": 25 })).unwrap();
        assert_eq!(numeric.count, Some(25));

        let text: RawPlaylist = serde_json::from_value(json!({ "count": "1,204" })).unwrap();
        assert_eq!(text.count, Some(1204));

        let garbage: RawPlaylist = serde_json::from_value(json!({ "count": "lots" })).unwrap();
        assert_eq!(garbage.count, None);

        let missing: RawPlaylist = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.count, None);
    }

    #[test]
    fn test_song_details_nested() {
        let song: RawSongDetails = serde_json::from_value(json!({
            "videoDetails": { "title": "Wonderwall", "author": "Oasis", "lengthSeconds": 258 }
        }))
        .unwrap();
        let details = song.video_details.unwrap();
        assert_eq!(details.author.as_deref(), Some("Oasis"));
        assert_eq!(details.length_seconds.as_deref(), Some("258"));
    }

    #[test]
    fn test_song_details_without_video_details() {
        let song: RawSongDetails = serde_json::from_value(json!({ "playabilityStatus": {} })).unwrap();
        assert!(song.video_details.is_none());
    }

    #[test]
    fn test_search_filter_wire_names() {
        assert_eq!(SearchFilter::Songs.as_str(), "songs");
        assert_eq!(SearchFilter::Playlists.to_string(), "playlists");
        assert_eq!(SearchFilter::default(), SearchFilter::Songs);
    }
}
