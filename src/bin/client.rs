//! pulsefeed client entry point.
//!
//! Connects to the feed, prints every received number, and performs
//! the graceful close handshake on Ctrl-C.

use tracing_subscriber::EnvFilter;

use pulsefeed::client;
use pulsefeed::config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(url = %config.url, "starting pulsefeed client");

    client::run(
        config,
        |number| println!("number received: {number}"),
        interrupt(),
    )
    .await?;

    Ok(())
}

/// Resolves on Ctrl-C.
async fn interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for interrupt");
        std::future::pending::<()>().await;
    }
}
