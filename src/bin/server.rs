//! Inventory core HTTP server.
//!
//! Builds the engine, spawns the expiry sweeper, and serves the API until
//! Ctrl+C.

use std::sync::Arc;
use ticket_inventory::{
    build_router, clock::SystemClock, engine::{EventInventoryCoordinator, ExpirySweeper, ReservationManager},
    metrics::register_inventory_metrics, AppState, Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ticket_inventory=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ticket inventory server...");

    let config = Arc::new(Config::from_env());
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        hold_ttl_secs = config.inventory.hold_ttl_secs,
        sweep_interval_secs = config.inventory.sweep_interval_secs,
        "Configuration loaded"
    );

    register_inventory_metrics();

    // Build the engine
    let clock = Arc::new(SystemClock);
    let manager = Arc::new(ReservationManager::new(
        clock.clone(),
        config.inventory.max_hold_quantity,
    ));
    let coordinator = Arc::new(EventInventoryCoordinator::new(clock, manager.clone()));

    // Start the expiry sweeper
    let sweeper = ExpirySweeper::new(manager, config.inventory.sweep_interval()).spawn();

    // Serve the API
    let state = AppState::new(coordinator, config.clone());
    let router = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    // Stop the sweeper after the server drains
    sweeper.shutdown().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
