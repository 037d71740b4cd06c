//! Ticket inventory and reservation engine.
//!
//! Layered leaf-to-root:
//!
//! - [`ledger::TierLedger`] - per-tier counters with compare-and-adjust
//! - [`reservations::ReservationManager`] - hold → confirm/release
//!   lifecycle, the single serialization point per tier
//! - [`coordinator::EventInventoryCoordinator`] - per-event aggregation
//!   and cross-tier gates (free-event rule, purchasability)
//! - [`sweeper::ExpirySweeper`] - periodic reclamation of lapsed holds
//!
//! All mutation of tier counters passes through the manager's per-tier
//! lock; no component writes ledger fields directly. Locks are never held
//! across I/O.

pub mod coordinator;
pub mod ledger;
pub mod reservations;
pub mod sweeper;

pub use coordinator::EventInventoryCoordinator;
pub use ledger::TierLedger;
pub use reservations::ReservationManager;
pub use sweeper::{ExpirySweeper, SweeperHandle};

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// Poison recovery: a poisoned lock means another thread panicked mid-hold.
// The guarded data is counters and state rows whose invariants are
// re-verified on every mutation, so continuing with the inner value is
// sound and keeps the engine panic-free.

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
