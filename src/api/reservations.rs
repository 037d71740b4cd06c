//! Reservation transition endpoints.
//!
//! - POST /api/reservations/:id/confirm - payment succeeded, convert to sale
//! - POST /api/reservations/:id/release - caller cancelled, return inventory
//!
//! Confirm and release against the same reservation are mutually
//! exclusive: whichever commits first wins, the loser receives 409.

use crate::server::error::AppError;
use crate::server::state::AppState;
use crate::types::{ReservationId, ReservationState};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Response for reservation transitions.
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    /// Reservation ID
    pub reservation_id: Uuid,
    /// Tier the reservation belongs to
    pub tier_id: Uuid,
    /// Quantity
    pub quantity: u32,
    /// Resulting state
    pub state: ReservationState,
    /// Expiry of the original hold
    pub expires_at: DateTime<Utc>,
}

impl From<crate::types::Reservation> for ReservationResponse {
    fn from(reservation: crate::types::Reservation) -> Self {
        Self {
            reservation_id: *reservation.id.as_uuid(),
            tier_id: *reservation.tier_id.as_uuid(),
            quantity: reservation.quantity,
            state: reservation.state,
            expires_at: reservation.expires_at,
        }
    }
}

/// Confirm a held reservation.
///
/// A hold whose expiry already passed is not confirmable even before the
/// sweeper runs; the caller receives 410 and the inventory returns to the
/// pool.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/reservations/<id>/confirm
/// ```
pub async fn confirm_reservation(
    Path(reservation_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state
        .coordinator
        .confirm(ReservationId::from_uuid(reservation_id))?;
    Ok(Json(reservation.into()))
}

/// Release a held reservation (explicit cancellation).
///
/// ```bash
/// curl -X POST http://localhost:8080/api/reservations/<id>/release
/// ```
pub async fn release_reservation(
    Path(reservation_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state
        .coordinator
        .release(ReservationId::from_uuid(reservation_id))?;
    Ok(Json(reservation.into()))
}
