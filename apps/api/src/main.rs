use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tunebridge_api::config::Config;
use tunebridge_api::{build_app, build_cors_layer, AppState, CatalogSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing from RUST_LOG / LOG_LEVEL
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.common.log_level)
                .unwrap_or_else(|_| "tunebridge_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        environment = %config.environment(),
        catalog_url = %config.catalog().url,
        "Starting tunebridge API server on port {}",
        config.port
    );

    let session = CatalogSession::initialize(config.catalog());
    tracing::info!(
        ready = session.is_ready(),
        authenticated = session.is_authenticated(),
        "Catalog session established"
    );

    let cors_layer = build_cors_layer(config.cors_allowed_origins.as_deref());
    let app = build_app(AppState::new(session), cors_layer);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
