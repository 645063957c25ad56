//! Server resource handlers

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vpnmock_core::Server;

use super::AppState;
use crate::response::{json_body, ApiResponse, ApiResult};

/// GET /api/servers - All servers in store order
pub async fn list_servers(State(state): State<AppState>) -> Json<ApiResponse<Vec<Server>>> {
    let store = state.store.read().await;
    ApiResponse::ok(store.servers().to_vec())
}

/// GET /api/servers/{id}
pub async fn get_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Server>>> {
    let store = state.store.read().await;
    Ok(ApiResponse::ok(store.server(&id)?.clone()))
}

/// POST /api/servers - Create from a partial record
///
/// The new server gets a generated id and `status: "online"` unless the
/// body says otherwise.
pub async fn create_server(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Server>>)> {
    let body = json_body(&body)?;
    let server = state.store.write().await.create_server(body)?;
    Ok(ApiResponse::created(server))
}

/// PUT /api/servers/{id} - Shallow merge over the stored record
pub async fn update_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Server>>> {
    let body = json_body(&body)?;
    let server = state.store.write().await.update_server(&id, body)?;
    Ok(ApiResponse::ok(server))
}

/// DELETE /api/servers/{id} - Succeeds whether or not the id existed
pub async fn delete_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ApiResponse<()>> {
    state.store.write().await.delete_server(&id);
    ApiResponse::done()
}
