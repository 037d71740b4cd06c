//! Reservation lifecycle management.
//!
//! `ReservationManager` owns every [`TicketTier`] ledger and every
//! [`Reservation`] row, and orchestrates the hold → confirm/release
//! lifecycle between them.
//!
//! **Concurrency contract**: each tier has its own mutex and every
//! mutation touching that tier (hold, confirm, release, expire) runs
//! under it, so the ledger's compare-and-adjust is race-free. Operations
//! on different tiers proceed fully in parallel. Lock acquisition order
//! is tier map → tier slot → reservation map, everywhere.
//!
//! Reservation rows are transition-only: they are never deleted, which
//! preserves the audit trail and makes `Released` vs `Expired`
//! distinguishable after the fact.

use super::ledger::TierLedger;
use super::{lock, read, write};
use crate::clock::Clock;
use crate::error::InventoryError;
use crate::metrics;
use crate::types::{
    EventId, HolderReference, ReleaseReason, Reservation, ReservationId, ReservationState,
    TicketTier, TierAvailability, TierId,
};
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// One tier's authoritative state. The mutex is the per-tier
/// serialization point.
struct TierSlot {
    entry: Mutex<TierEntry>,
}

struct TierEntry {
    tier: TicketTier,
    ledger: TierLedger,
}

/// Creates, confirms, releases, and expires holds against tier ledgers.
pub struct ReservationManager {
    clock: Arc<dyn Clock>,
    max_hold_quantity: u32,
    tiers: RwLock<HashMap<TierId, Arc<TierSlot>>>,
    reservations: RwLock<HashMap<ReservationId, Reservation>>,
}

impl ReservationManager {
    /// Creates an empty manager.
    ///
    /// `max_hold_quantity` caps the ticket count of a single hold
    /// (per-order limit, configuration value).
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, max_hold_quantity: u32) -> Self {
        Self {
            clock,
            max_hold_quantity,
            tiers: RwLock::new(HashMap::new()),
            reservations: RwLock::new(HashMap::new()),
        }
    }

    // ========================================================================
    // Tier registry
    // ========================================================================

    /// Registers a tier and creates its ledger.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidConfiguration`] if a tier with the
    /// same id is already registered.
    pub fn register_tier(&self, tier: TicketTier) -> Result<(), InventoryError> {
        let mut tiers = write(&self.tiers);
        if tiers.contains_key(&tier.id) {
            return Err(InventoryError::InvalidConfiguration(format!(
                "tier {} is already registered",
                tier.id
            )));
        }
        let ledger = TierLedger::new(tier.quantity_total);
        tracing::info!(
            tier_id = %tier.id,
            event_id = %tier.event_id,
            name = %tier.name,
            total = tier.quantity_total,
            "Tier registered"
        );
        tiers.insert(
            tier.id,
            Arc::new(TierSlot {
                entry: Mutex::new(TierEntry { tier, ledger }),
            }),
        );
        Ok(())
    }

    /// Returns the event a tier belongs to, if the tier exists.
    #[must_use]
    pub fn tier_event(&self, tier_id: TierId) -> Option<EventId> {
        let slot = read(&self.tiers).get(&tier_id).cloned()?;
        let entry = lock(&slot.entry);
        Some(entry.tier.event_id)
    }

    /// Deactivates every tier of an event (soft delete). Returns the
    /// number of tiers that changed state.
    pub fn deactivate_event_tiers(&self, event_id: EventId) -> usize {
        let slots: Vec<Arc<TierSlot>> = read(&self.tiers).values().cloned().collect();
        let mut deactivated = 0;
        for slot in slots {
            let mut entry = lock(&slot.entry);
            if entry.tier.event_id == event_id && entry.tier.is_active() {
                entry.tier.status = crate::types::TierStatus::Deactivated;
                deactivated += 1;
            }
        }
        if deactivated > 0 {
            tracing::info!(%event_id, deactivated, "Event tiers deactivated");
        }
        deactivated
    }

    /// Checks whether an event has at least one active tier.
    #[must_use]
    pub fn has_active_tiers(&self, event_id: EventId) -> bool {
        let slots: Vec<Arc<TierSlot>> = read(&self.tiers).values().cloned().collect();
        slots.iter().any(|slot| {
            let entry = lock(&slot.entry);
            entry.tier.event_id == event_id && entry.tier.is_active()
        })
    }

    /// Reads availability for every tier of an event.
    ///
    /// Each tier is read under its own lock, so each row is internally
    /// consistent; rows are read at slightly different instants.
    #[must_use]
    pub fn event_tier_availability(&self, event_id: EventId) -> Vec<TierAvailability> {
        let slots: Vec<Arc<TierSlot>> = read(&self.tiers).values().cloned().collect();
        let mut rows: Vec<TierAvailability> = slots
            .iter()
            .filter_map(|slot| {
                let entry = lock(&slot.entry);
                if entry.tier.event_id != event_id {
                    return None;
                }
                Some(TierAvailability {
                    tier_id: entry.tier.id,
                    name: entry.tier.name.clone(),
                    total: entry.ledger.total(),
                    reserved: entry.ledger.reserved(),
                    sold: entry.ledger.sold(),
                    available: entry.ledger.available(),
                })
            })
            .collect();
        // HashMap iteration order is arbitrary; present tiers stably
        rows.sort_by(|a, b| a.tier_id.cmp(&b.tier_id));
        rows
    }

    // ========================================================================
    // Hold lifecycle
    // ========================================================================

    /// Places a time-boxed hold of `quantity` tickets against a tier.
    ///
    /// The returned reservation is `Held` and lapses at `now + ttl`
    /// unless confirmed or released first.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::InvalidQuantity`] if `quantity` is zero or
    ///   exceeds the per-order limit
    /// - [`InventoryError::TierNotFound`] / [`InventoryError::TierInactive`]
    /// - [`InventoryError::InsufficientInventory`] if the tier cannot
    ///   cover `quantity`
    pub fn hold(
        &self,
        tier_id: TierId,
        holder_reference: HolderReference,
        quantity: u32,
        ttl: Duration,
    ) -> Result<Reservation, InventoryError> {
        if quantity == 0 || quantity > self.max_hold_quantity {
            return Err(InventoryError::InvalidQuantity {
                requested: quantity,
                limit: self.max_hold_quantity,
            });
        }

        let slot = read(&self.tiers)
            .get(&tier_id)
            .cloned()
            .ok_or(InventoryError::TierNotFound(tier_id))?;

        let mut entry = lock(&slot.entry);
        if !entry.tier.is_active() {
            return Err(InventoryError::TierInactive(tier_id));
        }

        if let Err(err) = entry.ledger.reserve(quantity) {
            if matches!(err, InventoryError::InsufficientInventory { .. }) {
                metrics::record_hold_rejected();
                tracing::debug!(
                    %tier_id,
                    holder = %holder_reference,
                    quantity,
                    available = entry.ledger.available(),
                    "Hold rejected: insufficient inventory"
                );
            }
            return Err(err);
        }

        let now = self.clock.now();
        let reservation = Reservation {
            id: ReservationId::new(),
            tier_id,
            holder_reference,
            quantity,
            state: ReservationState::Held,
            created_at: now,
            expires_at: now + ttl,
        };

        // Insert under the tier lock so the row and the reserved counter
        // move together
        write(&self.reservations).insert(reservation.id, reservation.clone());

        metrics::record_hold_created(quantity);
        tracing::info!(
            reservation_id = %reservation.id,
            %tier_id,
            holder = %reservation.holder_reference,
            quantity,
            expires_at = %reservation.expires_at,
            "Hold created"
        );
        Ok(reservation)
    }

    /// Confirms a held reservation, converting its quantity to a sale.
    ///
    /// Expiry is checked against the clock here: a lapsed hold is not
    /// confirmable even if the sweeper has not run yet. Such a hold is
    /// transitioned to `Expired` and its inventory released before the
    /// error is returned.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::ReservationNotFound`]
    /// - [`InventoryError::AlreadyTerminal`] if another transition won
    /// - [`InventoryError::Expired`] if the hold lapsed
    /// - [`InventoryError::InvariantViolation`] if the ledger disagrees
    ///   with the row (a bug; the operation fails closed)
    pub fn confirm(&self, reservation_id: ReservationId) -> Result<Reservation, InventoryError> {
        let tier_id = self.reservation_tier(reservation_id)?;
        let slot = read(&self.tiers)
            .get(&tier_id)
            .cloned()
            .ok_or(InventoryError::TierNotFound(tier_id))?;

        let mut entry = lock(&slot.entry);
        let mut reservations = write(&self.reservations);
        let reservation = reservations
            .get_mut(&reservation_id)
            .ok_or(InventoryError::ReservationNotFound(reservation_id))?;

        if reservation.state.is_terminal() {
            return Err(InventoryError::AlreadyTerminal {
                id: reservation_id,
                state: reservation.state,
            });
        }

        let now = self.clock.now();
        if reservation.is_expired(now) {
            entry.ledger.release(reservation.quantity);
            reservation.state = ReservationState::Expired;
            metrics::record_hold_expired();
            tracing::info!(
                %reservation_id,
                %tier_id,
                "Confirm rejected: hold already expired"
            );
            return Err(InventoryError::Expired(reservation_id));
        }

        entry.ledger.confirm(reservation.quantity)?;
        reservation.state = ReservationState::Confirmed;

        let held_for = (now - reservation.created_at).num_milliseconds() as f64 / 1_000.0;
        metrics::record_hold_confirmed(reservation.quantity, held_for);
        tracing::info!(
            %reservation_id,
            %tier_id,
            quantity = reservation.quantity,
            "Hold confirmed"
        );
        Ok(reservation.clone())
    }

    /// Releases a held reservation back to available inventory.
    ///
    /// The terminal state records why: `Released` for caller
    /// cancellation, `Expired` for timeout. A cancellation arriving after
    /// the hold already lapsed is recorded as `Expired`.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::ReservationNotFound`]
    /// - [`InventoryError::AlreadyTerminal`] if another transition won
    pub fn release(
        &self,
        reservation_id: ReservationId,
        reason: ReleaseReason,
    ) -> Result<Reservation, InventoryError> {
        let tier_id = self.reservation_tier(reservation_id)?;
        let slot = read(&self.tiers)
            .get(&tier_id)
            .cloned()
            .ok_or(InventoryError::TierNotFound(tier_id))?;

        let mut entry = lock(&slot.entry);
        let mut reservations = write(&self.reservations);
        let reservation = reservations
            .get_mut(&reservation_id)
            .ok_or(InventoryError::ReservationNotFound(reservation_id))?;

        if reservation.state.is_terminal() {
            return Err(InventoryError::AlreadyTerminal {
                id: reservation_id,
                state: reservation.state,
            });
        }

        entry.ledger.release(reservation.quantity);

        let lapsed = reservation.is_expired(self.clock.now());
        reservation.state = match reason {
            ReleaseReason::Timeout => ReservationState::Expired,
            ReleaseReason::Cancelled if lapsed => ReservationState::Expired,
            ReleaseReason::Cancelled => ReservationState::Released,
        };

        match reservation.state {
            ReservationState::Expired => metrics::record_hold_expired(),
            _ => metrics::record_hold_released(),
        }
        tracing::info!(
            %reservation_id,
            %tier_id,
            quantity = reservation.quantity,
            state = %reservation.state,
            "Hold released"
        );
        Ok(reservation.clone())
    }

    /// Releases every held reservation whose expiry has passed. Returns
    /// how many were reclaimed.
    ///
    /// Safe to run concurrently with itself and with confirms: a row that
    /// reached a terminal state between the scan and the transition is
    /// skipped, never double-released.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let candidates: Vec<ReservationId> = read(&self.reservations)
            .values()
            .filter(|r| r.state == ReservationState::Held && r.is_expired(now))
            .map(|r| r.id)
            .collect();

        let mut released = 0;
        for id in candidates {
            match self.release(id, ReleaseReason::Timeout) {
                Ok(_) => released += 1,
                Err(InventoryError::AlreadyTerminal { .. }) => {}
                Err(err) => {
                    tracing::warn!(reservation_id = %id, %err, "Sweep skipped reservation");
                }
            }
        }
        if released > 0 {
            tracing::info!(released, "Expired holds reclaimed");
        }
        released
    }

    /// Looks up a reservation row.
    #[must_use]
    pub fn reservation(&self, reservation_id: ReservationId) -> Option<Reservation> {
        read(&self.reservations).get(&reservation_id).cloned()
    }

    fn reservation_tier(
        &self,
        reservation_id: ReservationId,
    ) -> Result<TierId, InventoryError> {
        read(&self.reservations)
            .get(&reservation_id)
            .map(|r| r.tier_id)
            .ok_or(InventoryError::ReservationNotFound(reservation_id))
    }
}
