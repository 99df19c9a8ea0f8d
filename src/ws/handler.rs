//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::response::{IntoResponse, Response};

use super::producer::run_feed;
use crate::app_state::AppState;

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// Origin is deliberately not checked: any origin may connect, which
/// is acceptable only for a demo/test deployment. A request without
/// valid upgrade headers is logged and answered with the extractor's
/// rejection; the acceptor keeps serving other requests.
pub async fn feed_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<AppState>,
) -> Response {
    match ws {
        Ok(upgrade) => upgrade
            .on_upgrade(move |socket| run_feed(socket, state))
            .into_response(),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "websocket upgrade failed");
            rejection.into_response()
        }
    }
}
