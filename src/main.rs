//! pulsefeed server entry point.
//!
//! Starts the Axum server with the feed WebSocket endpoint, over
//! plaintext or TLS depending on configuration.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use pulsefeed::app;
use pulsefeed::app_state::AppState;
use pulsefeed::config::ServerConfig;
use pulsefeed::domain::ThreadRngSampler;
use pulsefeed::tls;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ServerConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting pulsefeed");

    // Shutdown signal observed by every producer loop
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Build application state
    let state = AppState {
        sampler: Arc::new(ThreadRngSampler::new(config.sample_bound)),
        tick_interval: config.tick_interval,
        shutdown: shutdown_rx,
    };

    // Build router
    let router = app::router(state);

    // Start server
    match config.tls {
        Some(ref tls_settings) => {
            tls::serve(router, config.listen_addr, tls_settings, shutdown_tx).await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
            tracing::info!(addr = %config.listen_addr, "server listening");
            axum::serve(listener, router)
                .with_graceful_shutdown(app::shutdown_signal(shutdown_tx))
                .await?;
        }
    }

    Ok(())
}
