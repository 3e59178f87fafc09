//! Binary entry point for the favorites service.

use clap::Parser;
use favorites_server::{AppState, app, config::ServerConfig, database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so its values act as flag defaults.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();

    let pool = database::connect(&config.database_url, config.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database {}: {}", config.database_url, e))?;
    tracing::info!(url = %config.database_url, "favorites database ready");

    let router = app(AppState::from_pool(pool.clone()), &config.cors_allowed_origins);

    let addr = config.server_address()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Weather favorites server running on http://{}", addr);
    tracing::info!("API health check: http://{}/api/health", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down gracefully, closing database");
    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
