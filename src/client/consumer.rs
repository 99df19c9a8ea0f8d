//! Consumer loop: reads payloads off the channel and emits them.

use futures_util::StreamExt;
use futures_util::stream::SplitStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;

use super::FeedStream;
use crate::domain::Payload;

/// Reads JSON payloads until the channel fails or closes.
///
/// Each decoded number goes straight to `on_number`, with no buffering
/// and no transformation. Any read error, malformed payload, or close frame
/// ends the loop; completion is then signaled exactly once through the
/// `done` channel, observable by every waiter.
pub async fn run_consumer<F>(
    mut ws_rx: SplitStream<FeedStream>,
    mut on_number: F,
    done: watch::Sender<bool>,
) where
    F: FnMut(u32),
{
    while let Some(msg) = ws_rx.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<Payload>(&text) {
                Ok(payload) => on_number(payload.number),
                Err(error) => {
                    tracing::warn!(%error, "malformed payload, dropping channel");
                    break;
                }
            },
            Ok(Message::Close(frame)) => {
                tracing::info!(?frame, "close received from peer");
                break;
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%error, "read failed");
                break;
            }
        }
    }

    let _ = done.send(true);
    tracing::debug!("consumer loop finished");
}
