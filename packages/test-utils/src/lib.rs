//! Shared test utilities for the tunebridge workspace
//!
//! This crate provides a mock of the external catalog service so the catalog
//! client and the API gateway can be tested without network dependencies.
//!
//! # Mock Services
//!
//! - [`MockCatalogServer`] - Mock catalog service (search, songs, library, playlists)
//!
//! # Example
//!
//! ```rust,ignore
//! use tunebridge_test_utils::{MockCatalogServer, PlaylistDetailFixture, TrackFixture};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let catalog = MockCatalogServer::start().await;
//!     catalog
//!         .mock_playlist("PL1", PlaylistDetailFixture::new("Road trip").track(TrackFixture::new("abc", "Wonderwall")))
//!         .await;
//!
//!     // Use catalog.url() to configure your client
//! }
//! ```

mod catalog;

pub use catalog::{
    MockCatalogServer, PlaylistDetailFixture, PlaylistFixture, SongFixture, TrackFixture,
};
