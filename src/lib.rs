//! Ticket Inventory & Reservation Core
//!
//! Tracks per-tier ticket counts for events and mediates the purchase
//! path: a time-boxed hold is taken against a tier, payment is attempted
//! by the caller (outside this crate), and the hold is then confirmed
//! into a sale or released back to the pool. Abandoned holds are
//! reclaimed by a periodic sweeper.
//!
//! # Architecture
//!
//! ```text
//! Purchase request
//!       │
//!       ▼
//! ┌──────────────────────────┐   event gates (published? cancelled?
//! │ EventInventoryCoordinator │   free-event rule, active tiers)
//! └──────────────────────────┘
//!       │
//!       ▼
//! ┌──────────────────────────┐   hold → confirm / release lifecycle,
//! │    ReservationManager     │   per-tier serialization point
//! └──────────────────────────┘
//!       │                ▲
//!       ▼                │ release(Timeout)
//! ┌──────────────┐  ┌──────────────┐
//! │  TierLedger   │  │ ExpirySweeper │
//! │ (per tier)    │  │  (periodic)   │
//! └──────────────┘  └──────────────┘
//! ```
//!
//! # Key guarantees
//!
//! - **No oversell**: availability is checked against `total - reserved -
//!   sold` under a per-tier lock, so concurrent holds for the last
//!   tickets serialize and at most the capacity is granted.
//! - **One terminal transition**: a held reservation moves exactly once,
//!   to Confirmed, Released, or Expired; later transitions lose with
//!   `AlreadyTerminal`.
//! - **Bounded leakage**: an abandoned hold is reclaimed lazily by any
//!   confirm that notices the lapsed expiry, and at the latest by the
//!   sweeper, so leaked inventory is bounded by `ttl + sweep_interval`.
//! - **Fail closed**: invariant violations (counters exceeding capacity,
//!   confirming more than was held) are logged at error severity and
//!   fail the operation; they are never silently corrected.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod server;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use engine::{EventInventoryCoordinator, ExpirySweeper, ReservationManager, TierLedger};
pub use error::InventoryError;
pub use server::{build_router, AppState};
pub use types::*;
