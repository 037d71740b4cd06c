//! Application state for the inventory HTTP server.

use crate::config::Config;
use crate::engine::EventInventoryCoordinator;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via Arc) for each request.
#[derive(Clone)]
pub struct AppState {
    /// Entry point into the inventory engine
    pub coordinator: Arc<EventInventoryCoordinator>,
    /// Application configuration (hold TTL, quantity limits)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(coordinator: Arc<EventInventoryCoordinator>, config: Arc<Config>) -> Self {
        Self {
            coordinator,
            config,
        }
    }
}
