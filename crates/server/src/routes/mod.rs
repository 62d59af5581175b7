//! HTTP route handlers for the slot configuration server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                        - Liveness check
//! GET    /health/ready                  - Readiness check (database ping)
//!
//! # Slot configurations
//! GET    /api/slot-configurations/defaults/{page_type}
//! GET    /api/slot-configurations/{store_id}/{page_type}/draft
//! PUT    /api/slot-configurations/{store_id}/{page_type}/draft
//! DELETE /api/slot-configurations/{store_id}/{page_type}/draft
//! GET    /api/slot-configurations/{store_id}/{page_type}/published
//! POST   /api/slot-configurations/{store_id}/{page_type}/publish
//! GET    /api/slot-configurations/{store_id}/{page_type}/versions
//! POST   /api/slot-configurations/{store_id}/{page_type}/versions/{version}/revert
//! ```

pub mod slot_configurations;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use pagecraft_core::SlotConfigurationService;
use serde::Serialize;

use crate::state::AppState;

/// JSON envelope wrapping every response body.
///
/// Successful responses carry `data` (which may itself be `null`), failures
/// carry `error`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Attach a human readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Failed response carrying an error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Build the complete router (without state or middleware).
pub fn router<S>() -> Router<AppState<S>>
where
    S: SlotConfigurationService + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness::<S>))
        .merge(slot_configurations::router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity when the state carries a pool.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness<S>(State(state): State<AppState<S>>) -> StatusCode
where
    S: SlotConfigurationService + 'static,
{
    let Some(pool) = state.pool() else {
        return StatusCode::OK;
    };
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Wrap `data` in a success envelope.
pub(crate) const fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}
