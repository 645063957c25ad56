//! Routing rule handlers
//!
//! Rules can be created, deleted and toggled; there is no PUT.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vpnmock_core::Rule;

use super::AppState;
use crate::response::{json_body, ApiResponse, ApiResult};

pub async fn list_rules(State(state): State<AppState>) -> Json<ApiResponse<Vec<Rule>>> {
    let store = state.store.read().await;
    ApiResponse::ok(store.rules().to_vec())
}

/// POST /api/rules - New rules start enabled
pub async fn create_rule(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Rule>>)> {
    let body = json_body(&body)?;
    let rule = state.store.write().await.create_rule(body)?;
    Ok(ApiResponse::created(rule))
}

pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ApiResponse<()>> {
    state.store.write().await.delete_rule(&id);
    ApiResponse::done()
}

/// PATCH /api/rules/{id}/toggle - Flip `enabled`
pub async fn toggle_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Rule>>> {
    let rule = state.store.write().await.toggle_rule(&id)?;
    Ok(ApiResponse::ok(rule))
}
