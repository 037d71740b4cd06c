//! Inventory edge case tests.
//!
//! Exercises the full hold lifecycle through the coordinator: reserve →
//! confirm/release, multi-holder contention, and the free-event guard.
//!
//! Run with: `cargo test --test inventory_edge_case_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use chrono::Duration;
use std::sync::Arc;
use ticket_inventory::clock::ManualClock;
use ticket_inventory::engine::{EventInventoryCoordinator, ReservationManager};
use ticket_inventory::error::InventoryError;
use ticket_inventory::types::{Money, ReservationState};

fn setup() -> (Arc<ManualClock>, Arc<EventInventoryCoordinator>) {
    let clock = Arc::new(ManualClock::starting_now());
    let manager = Arc::new(ReservationManager::new(clock.clone(), 8));
    let coordinator = Arc::new(EventInventoryCoordinator::new(clock.clone(), manager));
    (clock, coordinator)
}

fn ttl() -> Duration {
    Duration::minutes(10)
}

/// The worked scenario from the design contract:
///
/// Tier with total=5. Hold 3 (cartA) → available=2. Hold 2 (cartB) →
/// available=0. Hold 1 (cartC) → insufficient. Release cartA → available=3.
/// Confirm cartB → sold=2, reserved=0, available=3.
#[test]
fn test_multi_holder_scenario() {
    let (_, coordinator) = setup();
    let event = coordinator.create_event(false);
    let tier = coordinator
        .define_tier(event.id, "Ordinary", Money::from_cents(1_500), 5)
        .unwrap();
    coordinator.publish_event(event.id).unwrap();

    let available = |coordinator: &EventInventoryCoordinator| {
        coordinator.snapshot(event.id).unwrap().tiers[0].clone()
    };

    let cart_a = coordinator.hold(tier.id, "cartA".into(), 3, ttl()).unwrap();
    assert_eq!(available(&coordinator).available, 2);

    let cart_b = coordinator.hold(tier.id, "cartB".into(), 2, ttl()).unwrap();
    assert_eq!(available(&coordinator).available, 0);

    assert_eq!(
        coordinator.hold(tier.id, "cartC".into(), 1, ttl()),
        Err(InventoryError::InsufficientInventory {
            requested: 1,
            available: 0
        })
    );

    coordinator.release(cart_a.id).unwrap();
    assert_eq!(available(&coordinator).available, 3);

    let confirmed = coordinator.confirm(cart_b.id).unwrap();
    assert_eq!(confirmed.state, ReservationState::Confirmed);

    let tier_row = available(&coordinator);
    assert_eq!(tier_row.sold, 2);
    assert_eq!(tier_row.reserved, 0);
    assert_eq!(tier_row.available, 3);
}

/// Hold → confirm round trip: quantity moves reserved → sold, net
/// available unchanged by the confirm itself.
#[test]
fn test_hold_confirm_round_trip() {
    let (_, coordinator) = setup();
    let event = coordinator.create_event(false);
    let tier = coordinator
        .define_tier(event.id, "VIP", Money::from_cents(50_000), 100)
        .unwrap();
    coordinator.publish_event(event.id).unwrap();

    let reservation = coordinator
        .hold(tier.id, "cart-rt".into(), 3, ttl())
        .unwrap();
    let before = coordinator.snapshot(event.id).unwrap().tiers[0].clone();
    assert_eq!(before.reserved, 3);
    assert_eq!(before.available, 97);

    coordinator.confirm(reservation.id).unwrap();
    let after = coordinator.snapshot(event.id).unwrap().tiers[0].clone();
    assert_eq!(after.sold, 3);
    assert_eq!(after.reserved, 0);
    assert_eq!(after.available, 97);
}

/// Releasing the same reservation twice: Ok once, AlreadyTerminal after,
/// and the ledger counters move only once.
#[test]
fn test_idempotent_release() {
    let (_, coordinator) = setup();
    let event = coordinator.create_event(false);
    let tier = coordinator
        .define_tier(event.id, "General", Money::from_cents(2_000), 10)
        .unwrap();
    coordinator.publish_event(event.id).unwrap();

    let reservation = coordinator.hold(tier.id, "cart-1".into(), 4, ttl()).unwrap();
    assert!(coordinator.release(reservation.id).is_ok());
    assert_eq!(
        coordinator.release(reservation.id),
        Err(InventoryError::AlreadyTerminal {
            id: reservation.id,
            state: ReservationState::Released,
        })
    );

    let tier_row = coordinator.snapshot(event.id).unwrap().tiers[0].clone();
    assert_eq!(tier_row.reserved, 0);
    assert_eq!(tier_row.available, 10);
}

/// Free events never accept tier holds; tiers cannot even be defined.
#[test]
fn test_free_event_guard() {
    let (_, coordinator) = setup();
    let event = coordinator.create_event(true);
    coordinator.publish_event(event.id).unwrap();

    assert!(matches!(
        coordinator.define_tier(event.id, "VIP", Money::from_cents(1), 10),
        Err(InventoryError::InvalidConfiguration(_))
    ));

    let snapshot = coordinator.snapshot(event.id).unwrap();
    assert!(snapshot.is_free);
    assert!(snapshot.tiers.is_empty());
}

/// A hold taken per tier is independent: exhausting one tier leaves the
/// other sellable.
#[test]
fn test_tiers_are_independent() {
    let (_, coordinator) = setup();
    let event = coordinator.create_event(false);
    let vip = coordinator
        .define_tier(event.id, "VIP", Money::from_cents(50_000), 2)
        .unwrap();
    let ordinary = coordinator
        .define_tier(event.id, "Ordinary", Money::from_cents(2_000), 50)
        .unwrap();
    coordinator.publish_event(event.id).unwrap();

    coordinator.hold(vip.id, "cart-1".into(), 2, ttl()).unwrap();
    assert!(matches!(
        coordinator.hold(vip.id, "cart-2".into(), 1, ttl()),
        Err(InventoryError::InsufficientInventory { .. })
    ));
    // Ordinary is untouched
    let held = coordinator
        .hold(ordinary.id, "cart-2".into(), 4, ttl())
        .unwrap();
    assert_eq!(held.quantity, 4);

    let snapshot = coordinator.snapshot(event.id).unwrap();
    assert_eq!(snapshot.total_available, 46);
}

/// Cancelling an event deactivates its tiers but keeps sold counts
/// visible, and outstanding holds still expire normally.
#[test]
fn test_cancelled_event_keeps_history() {
    let (clock, coordinator) = setup();
    let event = coordinator.create_event(false);
    let tier = coordinator
        .define_tier(event.id, "General", Money::from_cents(2_000), 20)
        .unwrap();
    coordinator.publish_event(event.id).unwrap();

    let sold = coordinator.hold(tier.id, "cart-1".into(), 5, ttl()).unwrap();
    coordinator.confirm(sold.id).unwrap();
    let abandoned = coordinator.hold(tier.id, "cart-2".into(), 3, ttl()).unwrap();

    coordinator.cancel_event(event.id).unwrap();
    assert_eq!(
        coordinator.hold(tier.id, "cart-3".into(), 1, ttl()),
        Err(InventoryError::EventCancelled(event.id))
    );

    // Sales history survives the soft delete
    let snapshot = coordinator.snapshot(event.id).unwrap();
    assert_eq!(snapshot.tiers[0].sold, 5);

    // The abandoned hold still lapses
    clock.advance(Duration::minutes(11));
    assert_eq!(coordinator.manager().sweep_expired(), 1);
    assert_eq!(
        coordinator.manager().reservation(abandoned.id).unwrap().state,
        ReservationState::Expired
    );
}
