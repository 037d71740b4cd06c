//! Hold endpoint - the entry of the purchase path.
//!
//! - POST /api/tiers/:tier_id/hold - place a time-boxed hold
//!
//! Payment happens outside this core: the caller takes a hold, attempts
//! payment with its gateway, then confirms or releases the reservation.

use crate::server::error::AppError;
use crate::server::state::AppState;
use crate::types::{HolderReference, TierId};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for placing a hold.
#[derive(Debug, Deserialize)]
pub struct HoldRequest {
    /// Opaque caller reference (cart/session id)
    pub holder_reference: String,
    /// Number of tickets to hold
    pub quantity: u32,
}

/// Response for a granted hold.
#[derive(Debug, Serialize)]
pub struct HoldResponse {
    /// Reservation ID; confirm or release against this
    pub reservation_id: Uuid,
    /// Tier the hold was taken from
    pub tier_id: Uuid,
    /// Quantity held
    pub quantity: u32,
    /// When the hold lapses if not confirmed
    pub expires_at: DateTime<Utc>,
}

/// Place a time-boxed hold against a tier.
///
/// The checkout window (hold TTL) is a server configuration value.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/tiers/<tier_id>/hold \
///   -H 'Content-Type: application/json' \
///   -d '{"holder_reference": "cart-42", "quantity": 2}'
/// ```
///
/// Errors: 404 unknown tier, 409 sold out or event not accepting
/// reservations, 422 bad quantity.
pub async fn create_hold(
    Path(tier_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<HoldRequest>,
) -> Result<(StatusCode, Json<HoldResponse>), AppError> {
    if request.holder_reference.trim().is_empty() {
        return Err(AppError::bad_request("holder_reference must not be empty"));
    }

    let reservation = state.coordinator.hold(
        TierId::from_uuid(tier_id),
        HolderReference::new(request.holder_reference),
        request.quantity,
        state.config.inventory.hold_ttl(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(HoldResponse {
            reservation_id: *reservation.id.as_uuid(),
            tier_id: *reservation.tier_id.as_uuid(),
            quantity: reservation.quantity,
            expires_at: reservation.expires_at,
        }),
    ))
}
