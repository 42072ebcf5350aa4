//! Music catalog client for tunebridge
//!
//! This crate defines the [`CatalogClient`] capability the gateway depends on,
//! the loosely-typed raw records it returns, and [`HttpCatalogClient`], an
//! implementation that talks to the catalog service over JSON/HTTP.
//!
//! # Example
//!
//! ```rust,no_run
//! use tunebridge_catalog_client::{CatalogClient, HttpCatalogClient, SearchFilter};
//! use tunebridge_shared_config::CatalogConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpCatalogClient::anonymous(&CatalogConfig::with_url("http://localhost:9000"))?;
//!
//! for track in client.search("Wonderwall", SearchFilter::Songs, 10).await? {
//!     println!("{:?}", track.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Authentication
//!
//! Library access (saved playlists) needs a [`CredentialBundle`] loaded from
//! the file written by the setup wizard. Without one, the client still serves
//! searches and public lookups.

mod client;
mod credentials;
mod error;
mod models;

pub use client::{CatalogClient, HttpCatalogClient};
pub use credentials::{CredentialBundle, CredentialKind};
pub use error::{CatalogError, CatalogResult};
pub use models::{
    RawArtist, RawPlaylist, RawPlaylistDetail, RawSongDetails, RawThumbnail, RawTrack,
    RawVideoDetails, SearchFilter,
};
