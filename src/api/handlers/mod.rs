//! REST endpoint handlers.

pub mod page;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the REST routes, all mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().merge(page::routes()).merge(system::routes())
}
