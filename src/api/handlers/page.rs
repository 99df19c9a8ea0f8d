//! Embedded browser test page for the feed.

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use crate::app_state::AppState;

/// Markup served at the root path.
const FEED_PAGE: &str = include_str!("feed_page.html");

/// `GET /` — Browser test page.
///
/// Opens the feed from the browser with automatic `ws:`/`wss:` scheme
/// detection and renders the last 15 received numbers, discarding the
/// oldest entry once the cap is exceeded.
pub async fn page_handler() -> Html<&'static str> {
    Html(FEED_PAGE)
}

/// Page routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(page_handler))
}
