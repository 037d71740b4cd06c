//! HTTP API endpoints.

pub mod availability;
pub mod events;
pub mod holds;
pub mod reservations;
