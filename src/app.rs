//! Application router assembly and the interrupt-driven shutdown
//! signal, shared by the server binary and the integration tests.

use axum::Router;
use axum::routing::get;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::ws::handler::feed_handler;

/// Builds the complete router: REST surface plus the `/ws` upgrade
/// endpoint, with request tracing and a permissive CORS policy.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(feed_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolves when an interrupt arrives, after broadcasting `shutdown`
/// to every producer loop so each connection can close cleanly.
pub async fn shutdown_signal(shutdown: watch::Sender<bool>) {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for interrupt");
        std::future::pending::<()>().await;
    }
    tracing::info!("interrupt received, shutting down");
    let _ = shutdown.send(true);
}
