//! Error types for web handlers.
//!
//! Bridges the domain error taxonomy to HTTP responses, implementing
//! Axum's `IntoResponse`. User-facing messages are deliberately plain
//! ("sold out", "hold expired") and never leak invariant details.

use crate::error::InventoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 409 Conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message.into(), code.into())
    }

    /// Create a 410 Gone error.
    #[must_use]
    pub fn gone(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(StatusCode::GONE, message.into(), code.into())
    }

    /// Create a 422 Unprocessable Entity error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            message.into(),
            "VALIDATION_ERROR".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match &err {
            InventoryError::InsufficientInventory { .. } => {
                Self::conflict("sold out", "SOLD_OUT")
            }
            InventoryError::InvalidQuantity { limit, .. } => Self::validation(format!(
                "quantity must be between 1 and {limit}"
            )),
            InventoryError::TierNotFound(id) => Self::not_found("Tier", id),
            InventoryError::EventNotFound(id) => Self::not_found("Event", id),
            InventoryError::ReservationNotFound(id) => Self::not_found("Reservation", id),
            InventoryError::TierInactive(_)
            | InventoryError::EventCancelled(_)
            | InventoryError::EventNotPublished(_)
            | InventoryError::NoActiveTiers(_) => Self::conflict(
                "this event is no longer accepting reservations",
                "NOT_ACCEPTING_RESERVATIONS",
            ),
            InventoryError::AlreadyTerminal { .. } => Self::conflict(
                "reservation no longer valid, please retry",
                "RESERVATION_NOT_VALID",
            ),
            InventoryError::Expired(_) => {
                Self::gone("hold expired, please try again", "HOLD_EXPIRED")
            }
            InventoryError::InvalidConfiguration(message) => {
                Self::validation(message.clone()).with_source(anyhow::Error::new(err))
            }
            InventoryError::InvariantViolation(_) => {
                // Fail closed with a generic message; details go to the log only
                Self::internal("internal error").with_source(anyhow::Error::new(err))
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: String,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReservationId;

    #[test]
    fn insufficient_inventory_maps_to_sold_out_conflict() {
        let app_err: AppError = InventoryError::InsufficientInventory {
            requested: 3,
            available: 1,
        }
        .into();
        assert_eq!(app_err.status, StatusCode::CONFLICT);
        assert_eq!(app_err.code, "SOLD_OUT");
        assert_eq!(app_err.message, "sold out");
    }

    #[test]
    fn expired_maps_to_gone() {
        let app_err: AppError = InventoryError::Expired(ReservationId::new()).into();
        assert_eq!(app_err.status, StatusCode::GONE);
        assert_eq!(app_err.code, "HOLD_EXPIRED");
    }

    #[test]
    fn invariant_violation_hides_details() {
        let app_err: AppError =
            InventoryError::InvariantViolation("ledger overcommitted".to_string()).into();
        assert_eq!(app_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app_err.message, "internal error");
        assert!(app_err.source.is_some());
    }
}
