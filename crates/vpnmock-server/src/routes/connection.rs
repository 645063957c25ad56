//! Connection handlers
//!
//! The only state transition in the API: connect and disconnect rewrite
//! the connection record and log to history under one write guard.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use vpnmock_core::Connection;

use super::AppState;
use crate::response::{ApiResponse, ApiResult};

/// Connect request
///
/// Any body that does not carry a string `serverId` reads as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    /// Only string ids can match a server
    #[serde(default)]
    pub server_id: Option<Value>,
}

pub async fn get_connection(State(state): State<AppState>) -> Json<ApiResponse<Connection>> {
    let store = state.store.read().await;
    ApiResponse::ok(store.connection().clone())
}

/// POST /api/connection/connect - 404 is the only failure
pub async fn connect(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Connection>>> {
    let request: ConnectRequest = serde_json::from_slice(&body).unwrap_or_default();
    let server_id = request
        .server_id
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default();

    let mut store = state.store.write().await;
    let connection = store.connect(server_id)?.clone();
    Ok(ApiResponse::ok(connection))
}

/// POST /api/connection/disconnect - Always succeeds
pub async fn disconnect(State(state): State<AppState>) -> Json<ApiResponse<Connection>> {
    let mut store = state.store.write().await;
    ApiResponse::ok(store.disconnect().clone())
}
