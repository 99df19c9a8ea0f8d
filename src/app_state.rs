//! Shared application state injected into all Axum handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::domain::NumberSampler;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Sampler every producer loop draws its numbers from.
    pub sampler: Arc<dyn NumberSampler>,
    /// Period between payload pushes on each connection.
    pub tick_interval: Duration,
    /// Process-wide shutdown signal observed by every producer loop.
    pub shutdown: watch::Receiver<bool>,
}
