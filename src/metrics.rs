//! Business metrics for the inventory core.
//!
//! Prometheus-style metrics recorded through the `metrics` facade:
//!
//! ## Counters
//! - `inventory_holds_total{status}` - Holds by outcome (created, confirmed,
//!   released, expired, rejected)
//! - `inventory_tickets_sold_total` - Total tickets sold
//! - `inventory_sweeps_total` - Sweeper runs
//!
//! ## Gauges
//! - `inventory_active_holds` - Holds currently pending confirmation
//!
//! ## Histograms
//! - `inventory_hold_to_confirm_seconds` - Time from hold to confirmation

/// Initialize and register all metric descriptions.
///
/// Call once at application startup, before any metrics are recorded.
pub fn register_inventory_metrics() {
    metrics::describe_counter!(
        "inventory_holds_total",
        "Total holds by outcome (created, confirmed, released, expired, rejected)"
    );
    metrics::describe_counter!("inventory_tickets_sold_total", "Total tickets sold");
    metrics::describe_counter!("inventory_sweeps_total", "Expiry sweeper runs");
    metrics::describe_gauge!(
        "inventory_active_holds",
        "Holds currently pending confirmation"
    );
    metrics::describe_histogram!(
        "inventory_hold_to_confirm_seconds",
        "Time from hold creation to confirmation"
    );

    tracing::info!("Inventory metrics registered");
}

/// Record a hold granted against a tier.
pub fn record_hold_created(quantity: u32) {
    metrics::counter!("inventory_holds_total", "status" => "created").increment(1);
    metrics::gauge!("inventory_active_holds").increment(1.0);
    tracing::debug!(quantity, "Recorded hold_created metric");
}

/// Record a hold rejected for insufficient inventory.
pub fn record_hold_rejected() {
    metrics::counter!("inventory_holds_total", "status" => "rejected").increment(1);
}

/// Record a hold confirmed into a sale.
pub fn record_hold_confirmed(quantity: u32, hold_duration_secs: f64) {
    metrics::counter!("inventory_holds_total", "status" => "confirmed").increment(1);
    metrics::counter!("inventory_tickets_sold_total").increment(u64::from(quantity));
    metrics::gauge!("inventory_active_holds").decrement(1.0);
    metrics::histogram!("inventory_hold_to_confirm_seconds").record(hold_duration_secs);
    tracing::debug!(quantity, hold_duration_secs, "Recorded hold_confirmed metric");
}

/// Record a hold released by its holder.
pub fn record_hold_released() {
    metrics::counter!("inventory_holds_total", "status" => "released").increment(1);
    metrics::gauge!("inventory_active_holds").decrement(1.0);
}

/// Record a hold reclaimed after timeout.
pub fn record_hold_expired() {
    metrics::counter!("inventory_holds_total", "status" => "expired").increment(1);
    metrics::gauge!("inventory_active_holds").decrement(1.0);
}

/// Record one sweeper run and how many holds it reclaimed.
pub fn record_sweep(released: usize) {
    metrics::counter!("inventory_sweeps_total").increment(1);
    if released > 0 {
        tracing::debug!(released, "Recorded sweep metric");
    }
}
