//! Response models for the tunebridge API
//!
//! These are the strict, fully-defaulted records sent to the voice skill.
//! They are built per request by the normalizer and never stored.

pub mod playlist;
pub mod track;

pub use playlist::{Playlist, PlaylistDetail, PlaylistsResponse};
pub use track::{SearchResponse, SongDetail, Track};
