//! History handlers

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use vpnmock_core::{parse_limit, HistoryEntry};

use super::AppState;
use crate::response::ApiResponse;

/// Query string for `GET /api/history`
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    /// Kept as text so a bad value falls back to the default limit
    pub limit: Option<String>,
}

/// GET /api/history?limit=N - Most recent first, 20 by default
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<ApiResponse<Vec<HistoryEntry>>> {
    let limit = parse_limit(query.limit.as_deref());
    let store = state.store.read().await;
    ApiResponse::ok(store.history(limit))
}

pub async fn clear_history(State(state): State<AppState>) -> Json<ApiResponse<()>> {
    state.store.write().await.clear_history();
    ApiResponse::done()
}
