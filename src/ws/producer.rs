//! Per-connection producer loop.
//!
//! One loop per accepted connection, no cross-connection coordination.
//! Every tick samples a number and pushes it as a JSON text message;
//! the loop ends on write failure, on a close from the peer, or when
//! the process-wide shutdown signal fires.

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use futures_util::{SinkExt, StreamExt};
use tokio::time::Instant;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::domain::Payload;

/// Runs the outbound feed for a single WebSocket connection.
///
/// The first payload is sent one full tick after the upgrade, then one
/// per tick in strict send order. A failed send means the channel is
/// dead: the loop exits immediately and the transport is released with
/// no retry. On shutdown the loop sends a normal close frame first so
/// well-behaved clients can finish cleanly.
pub async fn run_feed(socket: WebSocket, state: AppState) {
    let feed_id = Uuid::new_v4();
    tracing::info!(%feed_id, "client connected");

    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut shutdown = state.shutdown.clone();
    let mut ticker =
        tokio::time::interval_at(Instant::now() + state.tick_interval, state.tick_interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let payload = Payload::new(state.sampler.sample());
                let json = serde_json::to_string(&payload).unwrap_or_default();
                if let Err(error) = ws_tx.send(Message::text(json)).await {
                    tracing::warn!(%feed_id, %error, "failed to send payload");
                    break;
                }
                tracing::debug!(%feed_id, number = payload.number, "payload sent");
            }
            // Drain the inbound half so a client-initiated close ends
            // the loop without waiting for the next write to fail.
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!(%feed_id, "client closed connection");
                        break;
                    }
                    Some(Err(error)) => {
                        tracing::warn!(%feed_id, %error, "read failed");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
            _ = shutdown.changed() => {
                tracing::info!(%feed_id, "server shutting down, closing feed");
                let frame = CloseFrame {
                    code: close_code::NORMAL,
                    reason: axum::extract::ws::Utf8Bytes::from_static(""),
                };
                if let Err(error) = ws_tx.send(Message::Close(Some(frame))).await {
                    tracing::debug!(%feed_id, %error, "close frame not delivered");
                }
                break;
            }
        }
    }

    // Flush any pending close reply before dropping the transport.
    let _ = ws_tx.close().await;
    tracing::debug!(%feed_id, "feed closed");
}
