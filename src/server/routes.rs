//! Router configuration.
//!
//! Builds the complete Axum router with all endpoints.

use super::health::{health_check, readiness_check};
use super::state::AppState;
use crate::api::{availability, events, holds, reservations};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the complete Axum router.
///
/// - Health checks
/// - Event/tier administration
/// - Hold, confirm, and release endpoints (the purchase path)
/// - Inventory snapshot queries
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Event administration
        .route("/events", post(events::create_event))
        .route("/events/:id/publish", post(events::publish_event))
        .route("/events/:id/cancel", post(events::cancel_event))
        .route("/events/:id/tiers", post(events::define_tier))
        // Inventory snapshot (read side)
        .route("/events/:id/inventory", get(availability::get_event_inventory))
        // Purchase path
        .route("/tiers/:tier_id/hold", post(holds::create_hold))
        .route(
            "/reservations/:id/confirm",
            post(reservations::confirm_reservation),
        )
        .route(
            "/reservations/:id/release",
            post(reservations::release_reservation),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .with_state(state)
}
