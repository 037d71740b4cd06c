//! Error taxonomy for the inventory core.
//!
//! Business-rule failures (sold out, lost races, expired holds) are
//! expected and travel as typed `Result`s. Invariant violations indicate a
//! bug, are logged at error severity, and fail the operation closed; they
//! are never silently corrected.

use crate::types::{EventId, ReservationId, ReservationState, TierId};
use thiserror::Error;

/// Errors produced by the inventory engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Not enough tickets left to satisfy the request. Expected under
    /// contention; surfaced to users as "sold out".
    #[error("insufficient inventory: requested {requested}, available {available}")]
    InsufficientInventory {
        /// Quantity the caller asked for
        requested: u32,
        /// Quantity actually available at decision time
        available: u32,
    },

    /// Requested quantity is outside the per-order limits.
    #[error("invalid quantity: requested {requested}, limit {limit}")]
    InvalidQuantity {
        /// Quantity the caller asked for
        requested: u32,
        /// Maximum quantity per hold
        limit: u32,
    },

    /// No tier with this id is known.
    #[error("tier {0} not found")]
    TierNotFound(TierId),

    /// The tier exists but is not accepting holds.
    #[error("tier {0} is not active")]
    TierInactive(TierId),

    /// No event with this id is known.
    #[error("event {0} not found")]
    EventNotFound(EventId),

    /// The event was cancelled.
    #[error("event {0} is cancelled")]
    EventCancelled(EventId),

    /// The event has not been published yet.
    #[error("event {0} is not published")]
    EventNotPublished(EventId),

    /// The event has no active tiers to sell from.
    #[error("event {0} has no active tiers")]
    NoActiveTiers(EventId),

    /// No reservation with this id is known.
    #[error("reservation {0} not found")]
    ReservationNotFound(ReservationId),

    /// The reservation already reached a terminal state; whichever
    /// transition committed first won.
    #[error("reservation {id} is already {state}")]
    AlreadyTerminal {
        /// Reservation that lost the race
        id: ReservationId,
        /// The terminal state it is in
        state: ReservationState,
    },

    /// The hold lapsed before it could be confirmed.
    #[error("reservation {0} has expired")]
    Expired(ReservationId),

    /// Admin/programmer error, e.g. defining a tier on a free event.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A state that should be structurally impossible. Fatal: the
    /// operation fails closed rather than guessing a recovery.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl InventoryError {
    /// Checks whether this error indicates a bug rather than a
    /// business-rule rejection.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvariantViolation(_) | Self::InvalidConfiguration(_)
        )
    }
}
