//! Domain types for the ticket inventory core.
//!
//! Value objects, entities, and read models shared by the engine and the
//! HTTP surface. Identifiers are UUID-backed newtypes so a tier id can
//! never be passed where a reservation id is expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `EventId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a ticket tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TierId(Uuid);

impl TierId {
    /// Creates a new random `TierId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `TierId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TierId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a reservation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Creates a new random `ReservationId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `ReservationId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque caller-supplied reference identifying the holder of a
/// reservation (a cart id, session id, or similar). The engine never
/// interprets it; it exists so callers can correlate holds with their
/// own state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderReference(String);

impl HolderReference {
    /// Creates a new `HolderReference`
    #[must_use]
    pub const fn new(reference: String) -> Self {
        Self(reference)
    }

    /// Returns the reference as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HolderReference {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

impl fmt::Display for HolderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money Value Object (minor currency units to avoid floating point errors)
// ============================================================================

/// Represents money in minor currency units (cents) to avoid
/// floating-point arithmetic errors
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` value from minor currency units
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in minor currency units
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Multiplies money by a quantity with overflow checking
    #[must_use]
    pub const fn checked_multiply(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Domain Entities
// ============================================================================

/// A priced category of tickets for one event (e.g., VIP, Ordinary).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    /// Unique tier identifier
    pub id: TierId,
    /// Event this tier belongs to
    pub event_id: EventId,
    /// Tier name (e.g., "VIP", "Ordinary")
    pub name: String,
    /// Price per ticket in minor currency units
    pub unit_price: Money,
    /// Total number of tickets in this tier
    pub quantity_total: u32,
    /// Current tier status
    pub status: TierStatus,
    /// When the tier was created
    pub created_at: DateTime<Utc>,
}

impl TicketTier {
    /// Creates a new active `TicketTier`
    #[must_use]
    pub const fn new(
        id: TierId,
        event_id: EventId,
        name: String,
        unit_price: Money,
        quantity_total: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            event_id,
            name,
            unit_price,
            quantity_total,
            status: TierStatus::Active,
            created_at,
        }
    }

    /// Checks if the tier is accepting new holds
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, TierStatus::Active)
    }
}

/// Tier status. Tiers are soft-deleted (Deactivated) rather than removed
/// so historical reservation rows keep a valid tier to point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierStatus {
    /// Accepting holds
    Active,
    /// No new holds accepted (event cancelled or tier retired)
    Deactivated,
}

/// A time-boxed reservation of tier inventory pending confirmation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique reservation identifier
    pub id: ReservationId,
    /// Tier the inventory was taken from
    pub tier_id: TierId,
    /// Caller-supplied holder reference (cart/session id)
    pub holder_reference: HolderReference,
    /// Number of tickets held
    pub quantity: u32,
    /// Current lifecycle state
    pub state: ReservationState,
    /// When the reservation was created
    pub created_at: DateTime<Utc>,
    /// When the hold lapses if not confirmed
    pub expires_at: DateTime<Utc>,
}

impl Reservation {
    /// Checks whether the hold has lapsed at the given instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Reservation lifecycle state.
///
/// Exactly one transition out of `Held` is legal: to `Confirmed` (payment
/// succeeded), `Released` (caller cancelled), or `Expired` (timed out).
/// Terminal states never transition again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationState {
    /// Inventory is held, awaiting confirmation
    Held,
    /// Hold converted to a sale
    Confirmed,
    /// Hold cancelled by the caller
    Released,
    /// Hold reclaimed after its expiry passed
    Expired,
}

impl ReservationState {
    /// Checks whether the state admits no further transitions
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Held)
    }
}

impl fmt::Display for ReservationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Held => "held",
            Self::Confirmed => "confirmed",
            Self::Released => "released",
            Self::Expired => "expired",
        };
        write!(f, "{label}")
    }
}

/// Why a held reservation was returned to the available pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseReason {
    /// Explicit caller cancellation (terminal state: Released)
    Cancelled,
    /// Expiry passed (terminal state: Expired)
    Timeout,
}

// ============================================================================
// Events
// ============================================================================

/// Minimal event record the inventory core needs: whether tickets may be
/// sold, and whether the event is free (free events carry no tiers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique event identifier
    pub id: EventId,
    /// Free events track attendance, not ticket units; they have no tiers
    pub is_free: bool,
    /// Current event status
    pub status: EventStatus,
    /// When the event was registered with the inventory core
    pub created_at: DateTime<Utc>,
}

/// Event lifecycle status as seen by the inventory core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    /// Being configured; holds are rejected
    Draft,
    /// Live; holds are accepted against active tiers
    Published,
    /// Cancelled; tiers are deactivated, holds rejected
    Cancelled,
}

// ============================================================================
// Read Models
// ============================================================================

/// Availability for a single tier (computed, read-only).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAvailability {
    /// Tier identifier
    pub tier_id: TierId,
    /// Tier name
    pub name: String,
    /// Total capacity
    pub total: u32,
    /// Currently held (pending confirmation)
    pub reserved: u32,
    /// Sold (confirmed)
    pub sold: u32,
    /// Available (total - reserved - sold)
    pub available: u32,
}

/// Per-event inventory snapshot across all tiers.
///
/// Each tier's numbers are internally consistent; tiers are read at
/// slightly different instants, so cross-tier skew is possible and
/// accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInventorySnapshot {
    /// Event identifier
    pub event_id: EventId,
    /// Whether the event is free (tier list is empty when true)
    pub is_free: bool,
    /// Availability per tier
    pub tiers: Vec<TierAvailability>,
    /// Sum of available across tiers
    pub total_available: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_state_terminality() {
        assert!(!ReservationState::Held.is_terminal());
        assert!(ReservationState::Confirmed.is_terminal());
        assert!(ReservationState::Released.is_terminal());
        assert!(ReservationState::Expired.is_terminal());
    }

    #[test]
    fn money_checked_multiply() {
        let price = Money::from_cents(2_500);
        assert_eq!(price.checked_multiply(4), Some(Money::from_cents(10_000)));
        assert_eq!(Money::from_cents(u64::MAX).checked_multiply(2), None);
    }

    #[test]
    fn money_display_uses_minor_units() {
        assert_eq!(Money::from_cents(12_345).to_string(), "123.45");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }
}
