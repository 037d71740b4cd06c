//! Hold expiry semantics.
//!
//! Uses a manual clock to pin down the expiry boundary, lazy reclamation
//! on confirm, and the interplay between explicit cancellation, the
//! sweeper, and lapsed holds.
//!
//! Run with: `cargo test --test expiry_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use chrono::Duration;
use std::sync::Arc;
use ticket_inventory::clock::{Clock, ManualClock};
use ticket_inventory::engine::{ExpirySweeper, ReservationManager};
use ticket_inventory::error::InventoryError;
use ticket_inventory::types::{
    EventId, Money, ReleaseReason, ReservationState, TicketTier, TierId,
};

fn manager_with_tier(total: u32) -> (Arc<ManualClock>, Arc<ReservationManager>, TierId) {
    let clock = Arc::new(ManualClock::starting_now());
    let manager = Arc::new(ReservationManager::new(clock.clone(), 8));
    let tier = TicketTier::new(
        TierId::new(),
        EventId::new(),
        "General".to_string(),
        Money::from_cents(2_000),
        total,
        clock.now(),
    );
    let tier_id = tier.id;
    manager.register_tier(tier).unwrap();
    (clock, manager, tier_id)
}

fn available(manager: &ReservationManager, tier_id: TierId) -> u32 {
    let event_id = manager.tier_event(tier_id).unwrap();
    manager
        .event_tier_availability(event_id)
        .into_iter()
        .find(|t| t.tier_id == tier_id)
        .unwrap()
        .available
}

/// The boundary is inclusive: a hold is confirmable strictly before
/// `expires_at` and expired from that instant on.
#[test]
fn expiry_boundary_is_inclusive() {
    let (clock, manager, tier_id) = manager_with_tier(10);
    let reservation = manager
        .hold(tier_id, "cart-1".into(), 2, Duration::minutes(10))
        .unwrap();

    // One second before the boundary: still confirmable
    clock.advance(Duration::minutes(10) - Duration::seconds(1));
    let fresh = manager
        .hold(tier_id, "cart-2".into(), 1, Duration::minutes(10))
        .unwrap();
    assert!(manager.confirm(fresh.id).is_ok());

    // At the boundary: expired
    clock.advance(Duration::seconds(1));
    assert_eq!(
        manager.confirm(reservation.id),
        Err(InventoryError::Expired(reservation.id))
    );
}

/// A lapsed hold is reclaimed by the confirm attempt itself; the
/// inventory is back in the pool before any sweeper run.
#[test]
fn confirm_reclaims_lapsed_hold_without_sweeper() {
    let (clock, manager, tier_id) = manager_with_tier(5);
    let reservation = manager
        .hold(tier_id, "cart-1".into(), 5, Duration::minutes(10))
        .unwrap();
    assert_eq!(available(&manager, tier_id), 0);

    clock.advance(Duration::minutes(11));
    assert_eq!(
        manager.confirm(reservation.id),
        Err(InventoryError::Expired(reservation.id))
    );

    // No sweep has run, yet a new buyer can take the whole tier
    assert_eq!(available(&manager, tier_id), 5);
    assert!(manager
        .hold(tier_id, "cart-2".into(), 5, Duration::minutes(10))
        .is_ok());
}

/// A cancellation arriving after the hold lapsed still succeeds, but the
/// terminal state records what actually happened: Expired, not Released.
#[test]
fn late_cancellation_records_expired() {
    let (clock, manager, tier_id) = manager_with_tier(10);
    let reservation = manager
        .hold(tier_id, "cart-1".into(), 2, Duration::minutes(10))
        .unwrap();

    clock.advance(Duration::minutes(15));
    let row = manager
        .release(reservation.id, ReleaseReason::Cancelled)
        .unwrap();
    assert_eq!(row.state, ReservationState::Expired);
    assert_eq!(available(&manager, tier_id), 10);
}

/// Sweeping after a confirm already reclaimed the hold is a no-op; the
/// inventory is not released twice.
#[test]
fn sweep_after_lazy_reclaim_is_noop() {
    let (clock, manager, tier_id) = manager_with_tier(10);
    let reservation = manager
        .hold(tier_id, "cart-1".into(), 4, Duration::minutes(10))
        .unwrap();

    clock.advance(Duration::minutes(11));
    let _ = manager.confirm(reservation.id); // lazy reclaim
    assert_eq!(available(&manager, tier_id), 10);

    assert_eq!(manager.sweep_expired(), 0);
    assert_eq!(available(&manager, tier_id), 10);
}

/// Holds with different TTLs lapse independently; repeated sweeps pick
/// up each hold exactly when its own expiry passes.
#[test]
fn staggered_ttls_lapse_independently() {
    let (clock, manager, tier_id) = manager_with_tier(10);
    let short = manager
        .hold(tier_id, "cart-1".into(), 2, Duration::minutes(5))
        .unwrap();
    let long = manager
        .hold(tier_id, "cart-2".into(), 3, Duration::minutes(20))
        .unwrap();

    clock.advance(Duration::minutes(6));
    assert_eq!(manager.sweep_expired(), 1);
    assert_eq!(
        manager.reservation(short.id).unwrap().state,
        ReservationState::Expired
    );
    assert_eq!(available(&manager, tier_id), 7);

    clock.advance(Duration::minutes(15));
    assert_eq!(manager.sweep_expired(), 1);
    assert_eq!(
        manager.reservation(long.id).unwrap().state,
        ReservationState::Expired
    );
    assert_eq!(available(&manager, tier_id), 10);
}

/// The spawned sweeper reclaims lapsed holds on its own and stops
/// cleanly on shutdown.
#[tokio::test]
async fn background_sweeper_reclaims_and_stops() {
    let (clock, manager, tier_id) = manager_with_tier(10);
    let reservation = manager
        .hold(tier_id, "cart-1".into(), 2, Duration::milliseconds(50))
        .unwrap();
    clock.advance(Duration::minutes(1));

    let sweeper =
        ExpirySweeper::new(manager.clone(), std::time::Duration::from_millis(20)).spawn();

    // Wait for at least one sweep tick
    tokio::time::sleep(std::time::Duration::from_millis(120)).await;
    sweeper.shutdown().await;

    assert_eq!(
        manager.reservation(reservation.id).unwrap().state,
        ReservationState::Expired
    );
    assert_eq!(available(&manager, tier_id), 10);
}
