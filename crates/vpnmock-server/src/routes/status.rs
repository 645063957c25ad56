//! Status and health handlers

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use vpnmock_core::StatusSnapshot;

use super::AppState;
use crate::response::ApiResponse;

/// Liveness body, sent without the envelope
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/status - Every collection plus derived counters
pub async fn get_status(State(state): State<AppState>) -> Json<ApiResponse<StatusSnapshot>> {
    let store = state.store.read().await;
    ApiResponse::ok(store.status())
}

pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
