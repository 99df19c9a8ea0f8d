//! Client side of the feed: connection initiation, the consumer loop,
//! and the graceful-close coordinator.
//!
//! The client runs exactly two concurrent tasks: the consumer loop
//! reading payloads, and the wait loop in [`run`] that owns the
//! [`ShutdownCoordinator`] and multiplexes between loop completion and
//! an interruption signal.

pub mod consumer;
pub mod shutdown;

use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::{
    Connector, MaybeTlsStream, WebSocketStream, connect_async, connect_async_tls_with_config,
};

use futures_util::StreamExt;

pub use shutdown::{CloseState, ShutdownCoordinator};

use crate::config::ClientConfig;
use crate::error::FeedError;

/// The client's view of the upgraded channel.
pub type FeedStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens the channel described by `config`.
///
/// With `insecure_tls` set, certificate verification is disabled via a
/// permissive `native-tls` connector. This test-only mode is never the
/// default and is logged loudly.
///
/// # Errors
///
/// Returns [`FeedError::Tls`] if the permissive connector cannot be
/// built, or [`FeedError::Dial`] if the WebSocket handshake fails.
pub async fn connect(config: &ClientConfig) -> Result<FeedStream, FeedError> {
    if config.insecure_tls {
        tracing::warn!("tls certificate verification disabled; test use only");
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        let (stream, _response) = connect_async_tls_with_config(
            config.url.as_str(),
            None,
            false,
            Some(Connector::NativeTls(tls)),
        )
        .await?;
        Ok(stream)
    } else {
        let (stream, _response) = connect_async(config.url.as_str()).await?;
        Ok(stream)
    }
}

/// Connects and consumes the feed until it ends or `interrupt`
/// resolves.
///
/// Every received number is handed to `on_number`. On interruption the
/// coordinator sends a close notification and waits up to
/// `config.close_grace` for the consumer to observe the peer's
/// acknowledgement before returning.
///
/// # Errors
///
/// Returns an error only for connection establishment; a one-shot
/// connectivity assumption, fatal to the caller, with no retry.
pub async fn run<F, I>(config: ClientConfig, on_number: F, interrupt: I) -> Result<(), FeedError>
where
    F: FnMut(u32) + Send + 'static,
    I: Future<Output = ()>,
{
    let stream = connect(&config).await?;
    tracing::info!(url = %config.url, "connected");

    let (mut ws_tx, ws_rx) = stream.split();
    let (done_tx, mut done_rx) = watch::channel(false);
    let consumer = tokio::spawn(consumer::run_consumer(ws_rx, on_number, done_tx));

    let mut coordinator = ShutdownCoordinator::new(config.close_grace);
    let mut done_wait = done_rx.clone();
    tokio::pin!(interrupt);

    tokio::select! {
        _ = done_wait.wait_for(|done| *done) => {
            tracing::info!("feed ended");
        }
        () = &mut interrupt => {
            tracing::info!("interrupt received, closing channel");
            if coordinator.begin_close(&mut ws_tx).await == CloseState::CloseSent {
                coordinator.await_peer(&mut done_rx).await;
            }
        }
    }

    consumer.abort();
    Ok(())
}
