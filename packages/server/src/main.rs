// Main entry point for the pricing API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::{build_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,pricing=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting pricing API server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let state = build_state(&config).await?;
    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_state(config: &Config) -> Result<AppState> {
    use pricing::{MemoryStore, PostgresStore};

    if let Some(url) = &config.database_url {
        tracing::info!("Connecting to Postgres store...");
        let store = PostgresStore::new(url)
            .await
            .context("Failed to initialize Postgres store")?;
        tracing::info!("Postgres store ready");
        return Ok(AppState::new(
            config.settings.clone(),
            Arc::new(store),
            "postgres",
        ));
    }

    Ok(AppState::new(
        config.settings.clone(),
        Arc::new(MemoryStore::new()),
        "memory",
    ))
}

#[cfg(not(feature = "postgres"))]
async fn build_state(config: &Config) -> Result<AppState> {
    use pricing::MemoryStore;

    if config.database_url.is_some() {
        tracing::warn!("DATABASE_URL is set but the postgres feature is disabled; using the in-memory store");
    }

    Ok(AppState::new(
        config.settings.clone(),
        Arc::new(MemoryStore::new()),
        "memory",
    ))
}
