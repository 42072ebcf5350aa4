//! Catalog search and song lookup
//!
//! - `POST /search` - `{"query": "..."}`, up to ten songs
//! - `POST /get_song` - `{"video_id": "..."}`, details for one song

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::debug;
use tunebridge_catalog_client::SearchFilter;

use super::{not_found, AppState};
use crate::error::{ApiError, ApiResult};
use crate::middleware::JsonBody;
use crate::models::{SearchResponse, SongDetail};
use crate::services::normalizer;

/// Raw search results requested and kept
pub const SEARCH_LIMIT: u32 = 10;

pub const QUERY_REQUIRED: &str = "Query parameter is required";
pub const VIDEO_ID_REQUIRED: &str = "video_id parameter is required";
pub const SONG_NOT_FOUND: &str = "Song not found";

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SongRequest {
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Create the search router
pub fn search_router() -> Router<AppState> {
    Router::new()
        .route("/search", post(search).fallback(not_found))
        .route("/get_song", post(get_song).fallback(not_found))
}

/// A required string field: absent or empty is missing, anything else is kept as sent
fn required(value: Option<String>, message: &str) -> ApiResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::validation(message))
}

async fn search(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SearchRequest>,
) -> ApiResult<Json<SearchResponse>> {
    let query = required(request.query, QUERY_REQUIRED)?;
    let client = state.session.client()?;

    let raws = client
        .search(&query, SearchFilter::Songs, SEARCH_LIMIT)
        .await?;
    let results = normalizer::to_tracks(&raws, SEARCH_LIMIT as usize);

    debug!(
        query = %query,
        raw_count = raws.len(),
        result_count = results.len(),
        "Search complete"
    );

    Ok(Json(SearchResponse::new(query, results)))
}

async fn get_song(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SongRequest>,
) -> ApiResult<Json<SongDetail>> {
    let video_id = required(request.video_id, VIDEO_ID_REQUIRED)?;
    let client = state.session.client()?;

    let song = client
        .get_song(&video_id)
        .await?
        .ok_or_else(|| ApiError::not_found(SONG_NOT_FOUND))?;

    Ok(Json(normalizer::to_song_detail(Some(&song), &video_id)))
}
