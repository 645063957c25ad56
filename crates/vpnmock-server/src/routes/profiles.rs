//! Profile handlers (read-only)

use axum::extract::State;
use axum::Json;
use vpnmock_core::Profile;

use super::AppState;
use crate::response::ApiResponse;

pub async fn list_profiles(State(state): State<AppState>) -> Json<ApiResponse<Vec<Profile>>> {
    let store = state.store.read().await;
    ApiResponse::ok(store.profiles().to_vec())
}

/// GET /api/profiles/active - First profile in the list
///
/// With no profiles configured the envelope carries no `data`.
pub async fn active_profile(State(state): State<AppState>) -> Json<ApiResponse<Profile>> {
    let store = state.store.read().await;
    ApiResponse::maybe(store.active_profile().cloned())
}
