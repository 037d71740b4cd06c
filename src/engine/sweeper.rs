//! Background reclamation of expired holds.
//!
//! A held reservation that is never confirmed is always eventually
//! reclaimed: lazily when a confirm notices the lapsed expiry, and at the
//! latest by this sweeper, bounding leaked inventory to
//! `ttl + sweep_interval`.
//!
//! Sweeps are idempotent, so overlapping runs (or a sweep racing a late
//! confirm) skip rows that already reached a terminal state.

use super::reservations::ReservationManager;
use crate::metrics;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Periodic task releasing expired reservations back to inventory.
pub struct ExpirySweeper {
    manager: Arc<ReservationManager>,
    interval: Duration,
}

impl ExpirySweeper {
    /// Creates a sweeper over the given manager.
    #[must_use]
    pub const fn new(manager: Arc<ReservationManager>, interval: Duration) -> Self {
        Self { manager, interval }
    }

    /// Runs one sweep synchronously. Returns the number of holds
    /// reclaimed.
    pub fn sweep(&self) -> usize {
        let released = self.manager.sweep_expired();
        metrics::record_sweep(released);
        released
    }

    /// Spawns the periodic sweep loop on the tokio runtime.
    pub fn spawn(self) -> SweeperHandle {
        let shutdown = Arc::new(Notify::new());
        let stop = shutdown.clone();
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The immediate first tick is fine: sweeping an empty map is a no-op
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.sweep();
                    }
                    () = stop.notified() => {
                        tracing::info!("Expiry sweeper stopping");
                        break;
                    }
                }
            }
        });

        tracing::info!(interval_secs = interval.as_secs(), "Expiry sweeper started");
        SweeperHandle { shutdown, handle }
    }
}

/// Handle for stopping a spawned sweeper.
pub struct SweeperHandle {
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the sweep loop to stop and waits for it to finish.
    pub async fn shutdown(self) {
        self.shutdown.notify_one();
        if let Err(err) = self.handle.await {
            tracing::warn!(%err, "Expiry sweeper task ended abnormally");
        }
    }
}
