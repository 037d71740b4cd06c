//! Event and tier administration endpoints.
//!
//! These are the admin-facing operations the surrounding application
//! (event owner dashboards) calls to set inventory up:
//! - POST /api/events - register an event
//! - POST /api/events/:id/publish - open it for sales
//! - POST /api/events/:id/cancel - cancel it (tiers deactivated, soft)
//! - POST /api/events/:id/tiers - define a ticket tier

use crate::server::error::AppError;
use crate::server::state::AppState;
use crate::types::{EventId, EventStatus, Money};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for event registration.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    /// Free events track attendance, not ticket units, and carry no tiers
    #[serde(default)]
    pub is_free: bool,
}

/// Response for event registration and lifecycle changes.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// Event ID
    pub event_id: Uuid,
    /// Whether the event is free
    pub is_free: bool,
    /// Current status
    pub status: EventStatus,
    /// When the event was registered
    pub created_at: DateTime<Utc>,
}

impl From<crate::types::EventRecord> for EventResponse {
    fn from(record: crate::types::EventRecord) -> Self {
        Self {
            event_id: *record.id.as_uuid(),
            is_free: record.is_free,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// Register a new event in draft status.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/events \
///   -H 'Content-Type: application/json' -d '{"is_free": false}'
/// ```
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> (StatusCode, Json<EventResponse>) {
    let record = state.coordinator.create_event(request.is_free);
    (StatusCode::CREATED, Json(record.into()))
}

/// Open an event for sales.
pub async fn publish_event(
    Path(event_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<EventResponse>, AppError> {
    let record = state
        .coordinator
        .publish_event(EventId::from_uuid(event_id))?;
    Ok(Json(record.into()))
}

/// Cancel an event. Its tiers are deactivated but kept (sales history
/// survives); outstanding holds lapse through the normal expiry path.
pub async fn cancel_event(
    Path(event_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<EventResponse>, AppError> {
    let record = state
        .coordinator
        .cancel_event(EventId::from_uuid(event_id))?;
    Ok(Json(record.into()))
}

/// Request body for tier definition.
#[derive(Debug, Deserialize)]
pub struct DefineTierRequest {
    /// Tier name (e.g., "VIP", "Ordinary")
    pub name: String,
    /// Price per ticket in minor currency units
    pub unit_price_cents: u64,
    /// Total tickets in the tier
    pub quantity_total: u32,
}

/// Response for tier definition.
#[derive(Debug, Serialize)]
pub struct TierResponse {
    /// Tier ID
    pub tier_id: Uuid,
    /// Owning event
    pub event_id: Uuid,
    /// Tier name
    pub name: String,
    /// Price per ticket in minor currency units
    pub unit_price_cents: u64,
    /// Total tickets
    pub quantity_total: u32,
}

/// Define a ticket tier for a paid event.
///
/// Fails with 422 for free events: they do not carry tiers.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/events/<id>/tiers \
///   -H 'Content-Type: application/json' \
///   -d '{"name": "VIP", "unit_price_cents": 50000, "quantity_total": 100}'
/// ```
pub async fn define_tier(
    Path(event_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<DefineTierRequest>,
) -> Result<(StatusCode, Json<TierResponse>), AppError> {
    let tier = state.coordinator.define_tier(
        EventId::from_uuid(event_id),
        &request.name,
        Money::from_cents(request.unit_price_cents),
        request.quantity_total,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(TierResponse {
            tier_id: *tier.id.as_uuid(),
            event_id: *tier.event_id.as_uuid(),
            name: tier.name,
            unit_price_cents: tier.unit_price.cents(),
            quantity_total: tier.quantity_total,
        }),
    ))
}
