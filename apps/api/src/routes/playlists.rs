//! Library playlists and playlist contents
//!
//! - `GET|POST /playlists` - playlists saved in the user's library
//! - `GET|POST /playlist/:playlist_id` - one playlist with its tracks
//!
//! Neither handler checks authentication itself. An anonymous catalog client
//! refuses library access and that failure is returned as a 500.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::debug;

use super::{not_found, AppState};
use crate::error::{ApiError, ApiResult};
use crate::models::{PlaylistDetail, PlaylistsResponse};
use crate::services::normalizer;

/// Library playlists requested
pub const LIBRARY_PLAYLIST_LIMIT: u32 = 25;

pub const PLAYLIST_NOT_FOUND: &str = "Playlist not found";

/// Create the playlists router
pub fn playlists_router() -> Router<AppState> {
    Router::new()
        .route(
            "/playlists",
            get(list_playlists)
                .post(list_playlists)
                .fallback(not_found),
        )
        .route(
            "/playlist/:playlist_id",
            get(playlist_songs).post(playlist_songs).fallback(not_found),
        )
}

async fn list_playlists(State(state): State<AppState>) -> ApiResult<Json<PlaylistsResponse>> {
    let client = state.session.client()?;

    let raws = client.list_playlists(LIBRARY_PLAYLIST_LIMIT).await?;
    let playlists: Vec<_> = raws.iter().map(normalizer::to_playlist).collect();

    debug!(count = playlists.len(), "Listed library playlists");
    Ok(Json(PlaylistsResponse::new(playlists)))
}

async fn playlist_songs(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> ApiResult<Json<PlaylistDetail>> {
    let client = state.session.client()?;

    let raw = client
        .get_playlist(&playlist_id, normalizer::PLAYLIST_TRACK_LIMIT as u32)
        .await?
        .ok_or_else(|| ApiError::not_found(PLAYLIST_NOT_FOUND))?;
    let detail = normalizer::to_playlist_detail(&raw, &playlist_id);

    debug!(
        playlist_id = %playlist_id,
        song_count = detail.count,
        "Fetched playlist"
    );
    Ok(Json(detail))
}
