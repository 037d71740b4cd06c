//! Inventory snapshot endpoint.
//!
//! - GET /api/events/:id/inventory - availability across all tiers
//!
//! Read-only; used by display layers such as the admin "tickets sold"
//! table and public availability badges.

use crate::server::error::AppError;
use crate::server::state::AppState;
use crate::types::EventId;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

/// Availability for a single tier.
#[derive(Debug, Serialize)]
pub struct TierInventory {
    /// Tier identifier
    pub tier_id: Uuid,
    /// Tier name
    pub name: String,
    /// Total capacity
    pub total: u32,
    /// Currently held (pending confirmation)
    pub reserved: u32,
    /// Sold
    pub sold: u32,
    /// Available (total - reserved - sold)
    pub available: u32,
}

/// Response for the event inventory query.
#[derive(Debug, Serialize)]
pub struct EventInventoryResponse {
    /// Event ID
    pub event_id: Uuid,
    /// Free events have an empty tier list
    pub is_free: bool,
    /// Availability by tier
    pub tiers: Vec<TierInventory>,
    /// Sum of available across tiers
    pub total_available: u32,
}

/// Get the inventory snapshot for an event.
///
/// ```bash
/// curl http://localhost:8080/api/events/<id>/inventory
/// ```
///
/// Response:
/// ```json
/// {
///   "event_id": "550e8400-e29b-41d4-a716-446655440000",
///   "is_free": false,
///   "tiers": [
///     {"tier_id": "...", "name": "VIP", "total": 100,
///      "reserved": 10, "sold": 50, "available": 40}
///   ],
///   "total_available": 40
/// }
/// ```
pub async fn get_event_inventory(
    Path(event_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<EventInventoryResponse>, AppError> {
    let snapshot = state.coordinator.snapshot(EventId::from_uuid(event_id))?;
    Ok(Json(EventInventoryResponse {
        event_id,
        is_free: snapshot.is_free,
        tiers: snapshot
            .tiers
            .into_iter()
            .map(|t| TierInventory {
                tier_id: *t.tier_id.as_uuid(),
                name: t.name,
                total: t.total,
                reserved: t.reserved,
                sold: t.sold,
                available: t.available,
            })
            .collect(),
        total_available: snapshot.total_available,
    }))
}
