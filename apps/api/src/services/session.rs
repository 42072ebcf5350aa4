//! Catalog session
//!
//! The session owns the one catalog client the process uses. It is built
//! once at startup, picking an authenticated client when a credential bundle
//! is available, and is read-only afterwards.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};
use tunebridge_catalog_client::{CatalogClient, CatalogResult, CredentialBundle, HttpCatalogClient};
use tunebridge_shared_config::CatalogConfig;

use crate::error::{ApiError, ApiResult};

/// Process-wide catalog access
pub struct CatalogSession {
    client: Option<Arc<dyn CatalogClient>>,
    authenticated: bool,
}

impl std::fmt::Debug for CatalogSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSession")
            .field("ready", &self.is_ready())
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

impl CatalogSession {
    /// Connect to the configured catalog
    ///
    /// Never fails: problems are logged and leave the session unauthenticated
    /// or not ready.
    pub fn initialize(config: &CatalogConfig) -> Self {
        Self::initialize_with(
            &config.credentials_path,
            |path| {
                let bundle = CredentialBundle::load(path)?;
                info!(kind = ?bundle.kind(), "Loaded catalog credential bundle");
                HttpCatalogClient::authenticated(config, bundle)
            },
            || HttpCatalogClient::anonymous(config),
        )
    }

    /// Connect using the given constructors
    ///
    /// When `credentials_path` exists, `connect_authenticated` is tried first.
    /// If it fails, or there is no bundle, `connect_anonymous` is tried. If
    /// that fails too the session is left without a client.
    pub fn initialize_with<C, A, U>(
        credentials_path: &Path,
        connect_authenticated: A,
        connect_anonymous: U,
    ) -> Self
    where
        C: CatalogClient + 'static,
        A: FnOnce(&Path) -> CatalogResult<C>,
        U: FnOnce() -> CatalogResult<C>,
    {
        if credentials_path.exists() {
            match connect_authenticated(credentials_path) {
                Ok(client) => {
                    info!(
                        path = %credentials_path.display(),
                        "Catalog client initialized with credentials"
                    );
                    return Self::ready(Arc::new(client), true);
                }
                Err(e) => {
                    warn!(
                        path = %credentials_path.display(),
                        error = %e,
                        "Authenticated catalog client failed, falling back to anonymous"
                    );
                }
            }
        } else {
            info!(
                path = %credentials_path.display(),
                "No credential bundle found, library access disabled"
            );
        }

        match connect_anonymous() {
            Ok(client) => {
                info!("Catalog client initialized without authentication");
                Self::ready(Arc::new(client), false)
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize catalog client");
                Self::uninitialized()
            }
        }
    }

    /// Session with a client already in hand
    pub fn ready(client: Arc<dyn CatalogClient>, authenticated: bool) -> Self {
        Self {
            client: Some(client),
            authenticated,
        }
    }

    /// Session without any catalog access
    pub fn uninitialized() -> Self {
        Self {
            client: None,
            authenticated: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The catalog client, or `ApiError::NotReady`
    pub fn client(&self) -> ApiResult<&dyn CatalogClient> {
        self.client.as_deref().ok_or(ApiError::NotReady)
    }
}
