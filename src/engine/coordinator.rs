//! Per-event inventory coordination.
//!
//! `EventInventoryCoordinator` is the entry point the surrounding
//! application calls. It keeps the minimal event registry the inventory
//! core needs (free vs. paid, lifecycle status), enforces the cross-tier
//! gates before any hold reaches the [`ReservationManager`], and answers
//! capacity queries.
//!
//! Free-event rule: free events carry no ticket tiers. Defining a tier on
//! a free event, or holding against one, is an admin/programmer error and
//! is rejected with `InvalidConfiguration`.

use super::reservations::ReservationManager;
use super::{read, write};
use crate::clock::Clock;
use crate::error::InventoryError;
use crate::types::{
    EventId, EventInventorySnapshot, EventRecord, EventStatus, HolderReference, Money,
    Reservation, ReservationId, ReleaseReason, TicketTier, TierId,
};
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Aggregates all tiers of one event and enforces event-level invariants.
pub struct EventInventoryCoordinator {
    clock: Arc<dyn Clock>,
    events: RwLock<HashMap<EventId, EventRecord>>,
    manager: Arc<ReservationManager>,
}

impl EventInventoryCoordinator {
    /// Creates a coordinator over the given reservation manager.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, manager: Arc<ReservationManager>) -> Self {
        Self {
            clock,
            events: RwLock::new(HashMap::new()),
            manager,
        }
    }

    /// The underlying reservation manager (shared with the sweeper).
    #[must_use]
    pub fn manager(&self) -> Arc<ReservationManager> {
        self.manager.clone()
    }

    // ========================================================================
    // Event administration
    // ========================================================================

    /// Registers a new event in `Draft` status.
    pub fn create_event(&self, is_free: bool) -> EventRecord {
        let record = EventRecord {
            id: EventId::new(),
            is_free,
            status: EventStatus::Draft,
            created_at: self.clock.now(),
        };
        write(&self.events).insert(record.id, record);
        tracing::info!(event_id = %record.id, is_free, "Event registered");
        record
    }

    /// Opens an event for sales. Idempotent for already-published events.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::EventNotFound`] or
    /// [`InventoryError::EventCancelled`].
    pub fn publish_event(&self, event_id: EventId) -> Result<EventRecord, InventoryError> {
        let mut events = write(&self.events);
        let record = events
            .get_mut(&event_id)
            .ok_or(InventoryError::EventNotFound(event_id))?;
        match record.status {
            EventStatus::Cancelled => Err(InventoryError::EventCancelled(event_id)),
            EventStatus::Draft | EventStatus::Published => {
                record.status = EventStatus::Published;
                tracing::info!(%event_id, "Event published");
                Ok(*record)
            }
        }
    }

    /// Cancels an event and deactivates its tiers (soft delete; tiers
    /// with sales survive for the audit trail). Outstanding holds lapse
    /// through the normal expiry path.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::EventNotFound`].
    pub fn cancel_event(&self, event_id: EventId) -> Result<EventRecord, InventoryError> {
        let record = {
            let mut events = write(&self.events);
            let record = events
                .get_mut(&event_id)
                .ok_or(InventoryError::EventNotFound(event_id))?;
            record.status = EventStatus::Cancelled;
            *record
        };
        // Tier locks are taken after the event map is released
        self.manager.deactivate_event_tiers(event_id);
        tracing::info!(%event_id, "Event cancelled");
        Ok(record)
    }

    /// Defines a new ticket tier for a paid event.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::EventNotFound`] / [`InventoryError::EventCancelled`]
    /// - [`InventoryError::InvalidConfiguration`] for tiers on free events
    ///   or blank tier names
    pub fn define_tier(
        &self,
        event_id: EventId,
        name: &str,
        unit_price: Money,
        quantity_total: u32,
    ) -> Result<TicketTier, InventoryError> {
        let record = self.event(event_id)?;
        if record.status == EventStatus::Cancelled {
            return Err(InventoryError::EventCancelled(event_id));
        }
        if record.is_free {
            let err = InventoryError::InvalidConfiguration(format!(
                "event {event_id} is free; free events do not carry ticket tiers"
            ));
            tracing::error!(%event_id, %err, "Tier definition rejected");
            return Err(err);
        }
        if name.trim().is_empty() {
            return Err(InventoryError::InvalidConfiguration(
                "tier name must not be blank".to_string(),
            ));
        }

        let tier = TicketTier::new(
            TierId::new(),
            event_id,
            name.to_string(),
            unit_price,
            quantity_total,
            self.clock.now(),
        );
        self.manager.register_tier(tier.clone())?;
        Ok(tier)
    }

    // ========================================================================
    // Gates and queries
    // ========================================================================

    /// Gate checked before any hold is attempted.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::EventNotFound`]
    /// - [`InventoryError::EventCancelled`] / [`InventoryError::EventNotPublished`]
    /// - [`InventoryError::NoActiveTiers`] for paid events with nothing to sell
    pub fn validate_purchasable(&self, event_id: EventId) -> Result<(), InventoryError> {
        let record = self.event(event_id)?;
        match record.status {
            EventStatus::Cancelled => return Err(InventoryError::EventCancelled(event_id)),
            EventStatus::Draft => return Err(InventoryError::EventNotPublished(event_id)),
            EventStatus::Published => {}
        }
        if !record.is_free && !self.manager.has_active_tiers(event_id) {
            return Err(InventoryError::NoActiveTiers(event_id));
        }
        Ok(())
    }

    /// Read-only availability snapshot across all tiers of an event.
    ///
    /// Free events report an empty tier list: their capacity is tracked
    /// as attendee count elsewhere, not as ticket units here.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::EventNotFound`].
    pub fn snapshot(&self, event_id: EventId) -> Result<EventInventorySnapshot, InventoryError> {
        let record = self.event(event_id)?;
        let tiers = if record.is_free {
            Vec::new()
        } else {
            self.manager.event_tier_availability(event_id)
        };
        let total_available = tiers.iter().map(|t| t.available).sum();
        Ok(EventInventorySnapshot {
            event_id,
            is_free: record.is_free,
            tiers,
            total_available,
        })
    }

    // ========================================================================
    // Purchase path
    // ========================================================================

    /// Places a hold after the event-level gates pass.
    ///
    /// # Errors
    ///
    /// Everything [`ReservationManager::hold`] returns, plus the gate
    /// errors from [`Self::validate_purchasable`] and
    /// [`InventoryError::InvalidConfiguration`] if the tier belongs to a
    /// free event.
    pub fn hold(
        &self,
        tier_id: TierId,
        holder_reference: HolderReference,
        quantity: u32,
        ttl: Duration,
    ) -> Result<Reservation, InventoryError> {
        let event_id = self
            .manager
            .tier_event(tier_id)
            .ok_or(InventoryError::TierNotFound(tier_id))?;

        // Tiers on free events should not exist at all; finding one is a
        // configuration bug, not a sold-out condition
        let record = self.event(event_id)?;
        if record.is_free {
            let err = InventoryError::InvalidConfiguration(format!(
                "tier {tier_id} belongs to free event {event_id}"
            ));
            tracing::error!(%tier_id, %event_id, %err, "Hold rejected");
            return Err(err);
        }

        self.validate_purchasable(event_id)?;
        self.manager.hold(tier_id, holder_reference, quantity, ttl)
    }

    /// Confirms a held reservation (payment succeeded).
    ///
    /// # Errors
    ///
    /// See [`ReservationManager::confirm`].
    pub fn confirm(&self, reservation_id: ReservationId) -> Result<Reservation, InventoryError> {
        self.manager.confirm(reservation_id)
    }

    /// Releases a held reservation (caller cancelled).
    ///
    /// # Errors
    ///
    /// See [`ReservationManager::release`].
    pub fn release(&self, reservation_id: ReservationId) -> Result<Reservation, InventoryError> {
        self.manager.release(reservation_id, ReleaseReason::Cancelled)
    }

    fn event(&self, event_id: EventId) -> Result<EventRecord, InventoryError> {
        read(&self.events)
            .get(&event_id)
            .copied()
            .ok_or(InventoryError::EventNotFound(event_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn coordinator() -> EventInventoryCoordinator {
        let clock = Arc::new(ManualClock::starting_now());
        let manager = Arc::new(ReservationManager::new(clock.clone(), 8));
        EventInventoryCoordinator::new(clock, manager)
    }

    #[test]
    fn free_events_reject_tier_definitions() {
        let coordinator = coordinator();
        let event = coordinator.create_event(true);
        let err = coordinator
            .define_tier(event.id, "VIP", Money::from_cents(5_000), 100)
            .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidConfiguration(_)));
    }

    #[test]
    fn free_event_snapshot_has_no_tiers() {
        let coordinator = coordinator();
        let event = coordinator.create_event(true);
        let snapshot = coordinator.snapshot(event.id).unwrap();
        assert!(snapshot.is_free);
        assert!(snapshot.tiers.is_empty());
        assert_eq!(snapshot.total_available, 0);
    }

    #[test]
    fn draft_events_are_not_purchasable() {
        let coordinator = coordinator();
        let event = coordinator.create_event(false);
        let tier = coordinator
            .define_tier(event.id, "Ordinary", Money::from_cents(1_500), 50)
            .unwrap();
        assert_eq!(
            coordinator.hold(tier.id, "cart-1".into(), 2, Duration::minutes(10)),
            Err(InventoryError::EventNotPublished(event.id))
        );
    }

    #[test]
    fn cancelled_events_reject_holds_and_new_tiers() {
        let coordinator = coordinator();
        let event = coordinator.create_event(false);
        let tier = coordinator
            .define_tier(event.id, "Ordinary", Money::from_cents(1_500), 50)
            .unwrap();
        coordinator.publish_event(event.id).unwrap();
        coordinator.cancel_event(event.id).unwrap();

        assert_eq!(
            coordinator.hold(tier.id, "cart-1".into(), 2, Duration::minutes(10)),
            Err(InventoryError::EventCancelled(event.id))
        );
        assert_eq!(
            coordinator.define_tier(event.id, "Late", Money::from_cents(900), 10),
            Err(InventoryError::EventCancelled(event.id))
        );
        // Tiers survive cancellation (soft delete) and still show in the snapshot
        let snapshot = coordinator.snapshot(event.id).unwrap();
        assert_eq!(snapshot.tiers.len(), 1);
    }

    #[test]
    fn published_event_without_tiers_is_not_purchasable() {
        let coordinator = coordinator();
        let event = coordinator.create_event(false);
        coordinator.publish_event(event.id).unwrap();
        assert_eq!(
            coordinator.validate_purchasable(event.id),
            Err(InventoryError::NoActiveTiers(event.id))
        );
    }

    #[test]
    fn hold_confirm_updates_snapshot() {
        let coordinator = coordinator();
        let event = coordinator.create_event(false);
        let tier = coordinator
            .define_tier(event.id, "VIP", Money::from_cents(5_000), 20)
            .unwrap();
        coordinator.publish_event(event.id).unwrap();

        let reservation = coordinator
            .hold(tier.id, "cart-1".into(), 3, Duration::minutes(10))
            .unwrap();
        coordinator.confirm(reservation.id).unwrap();

        let snapshot = coordinator.snapshot(event.id).unwrap();
        assert_eq!(snapshot.tiers.len(), 1);
        assert_eq!(snapshot.tiers[0].sold, 3);
        assert_eq!(snapshot.tiers[0].reserved, 0);
        assert_eq!(snapshot.total_available, 17);
    }

    #[test]
    fn unknown_event_snapshot_fails() {
        let coordinator = coordinator();
        let missing = EventId::new();
        assert_eq!(
            coordinator.snapshot(missing),
            Err(InventoryError::EventNotFound(missing))
        );
    }
}
