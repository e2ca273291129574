//! Meal badges API server entry point.

use std::error::Error;
use std::sync::Arc;

use mealbadges_api::config::Config;
use mealbadges_core::clock::SystemClock;
use mealbadges_tracking::domain::badges::NoBadgePolicy;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting meal badges API server");

    let config = Config::from_env()?;
    let addr = config.socket_addr()?;

    // Replay must finish before the listener is bound.
    let state =
        mealbadges_api::bootstrap(&config, Arc::new(SystemClock), Arc::new(NoBadgePolicy)).await?;
    let app = mealbadges_api::build_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
