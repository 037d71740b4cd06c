//! Per-tier inventory ledger.
//!
//! `TierLedger` holds the authoritative counters for one tier and performs
//! compare-and-adjust operations on them. It knows nothing about
//! reservations or events; callers serialize access per tier (see
//! `ReservationManager`), so each method can assume it runs alone.
//!
//! The ledger invariant is `sold + reserved <= total` at all times.
//! `available` is computed, never stored.

use crate::error::InventoryError;
use serde::{Deserialize, Serialize};

/// Authoritative counters for one ticket tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLedger {
    total: u32,
    reserved: u32,
    sold: u32,
}

impl TierLedger {
    /// Creates a ledger with `total` tickets, none reserved or sold.
    #[must_use]
    pub const fn new(total: u32) -> Self {
        Self {
            total,
            reserved: 0,
            sold: 0,
        }
    }

    /// Total capacity.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Currently held quantity (pending confirmation).
    #[must_use]
    pub const fn reserved(&self) -> u32 {
        self.reserved
    }

    /// Confirmed quantity.
    #[must_use]
    pub const fn sold(&self) -> u32 {
        self.sold
    }

    /// Number of tickets available for new holds.
    ///
    /// Reports zero (nothing to sell) if the counters are corrupt; the
    /// corruption itself is surfaced by [`Self::verify`] on the mutation
    /// paths, not hidden here.
    #[must_use]
    pub fn available(&self) -> u32 {
        match self.checked_available() {
            Some(available) => available,
            None => {
                tracing::error!(
                    total = self.total,
                    reserved = self.reserved,
                    sold = self.sold,
                    "ledger counters exceed capacity; reporting zero available"
                );
                0
            }
        }
    }

    fn checked_available(&self) -> Option<u32> {
        self.total
            .checked_sub(self.reserved)
            .and_then(|rest| rest.checked_sub(self.sold))
    }

    /// Verifies the ledger invariant, failing closed if it is broken.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvariantViolation`] if
    /// `reserved + sold > total`.
    pub fn verify(&self) -> Result<(), InventoryError> {
        if self.checked_available().is_some() {
            Ok(())
        } else {
            tracing::error!(
                total = self.total,
                reserved = self.reserved,
                sold = self.sold,
                "ledger invariant broken: reserved + sold exceeds total"
            );
            Err(InventoryError::InvariantViolation(format!(
                "tier ledger overcommitted: total={}, reserved={}, sold={}",
                self.total, self.reserved, self.sold
            )))
        }
    }

    /// Moves `quantity` from available to reserved.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InsufficientInventory`] if fewer than
    /// `quantity` tickets are available, and
    /// [`InventoryError::InvariantViolation`] if the counters are corrupt.
    pub fn reserve(&mut self, quantity: u32) -> Result<(), InventoryError> {
        self.verify()?;
        let available = self.available();
        if available < quantity {
            return Err(InventoryError::InsufficientInventory {
                requested: quantity,
                available,
            });
        }
        self.reserved += quantity;
        Ok(())
    }

    /// Moves `quantity` from reserved to sold.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvariantViolation`] if fewer than
    /// `quantity` tickets are reserved. That means a caller confirmed a
    /// hold the ledger never granted, which is a bug, not user input.
    pub fn confirm(&mut self, quantity: u32) -> Result<(), InventoryError> {
        if self.reserved < quantity {
            tracing::error!(
                reserved = self.reserved,
                quantity,
                "confirm exceeds reserved count"
            );
            return Err(InventoryError::InvariantViolation(format!(
                "confirm of {quantity} exceeds reserved count {}",
                self.reserved
            )));
        }
        self.reserved -= quantity;
        self.sold += quantity;
        Ok(())
    }

    /// Moves `quantity` out of reserved back to available. Returns the
    /// quantity actually released.
    ///
    /// Releasing more than is currently reserved is clamped and logged;
    /// it should never happen with correct callers, but release must stay
    /// idempotent-safe.
    pub fn release(&mut self, quantity: u32) -> u32 {
        let released = quantity.min(self.reserved);
        if released < quantity {
            tracing::warn!(
                reserved = self.reserved,
                quantity,
                "release exceeds reserved count; clamping"
            );
        }
        self.reserved -= released;
        released
    }
}
