//! Response envelope
//!
//! Every endpoint except health answers `{ success, data? }` on success
//! and `{ success: false, error }` on failure.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use vpnmock_core::StoreError;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with `data`
    pub fn ok(data: T) -> Json<Self> {
        Self::maybe(Some(data))
    }

    /// 200 with `data` only when present
    pub fn maybe(data: Option<T>) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }

    /// 201 with `data`
    pub fn created(data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(data))
    }
}

impl ApiResponse<()> {
    /// 200 without `data`
    pub fn done() -> Json<Self> {
        Self::maybe(None)
    }
}

/// Failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Id lookup failed
    #[error("{0}")]
    NotFound(String),

    /// Body was not usable JSON for the target record
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!("Request failed ({}): {}", status, self);
        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::InvalidRecord { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}

/// Read a request body as JSON whatever its `Content-Type`
///
/// An empty body reads as `{}`.
pub fn json_body(bytes: &Bytes) -> ApiResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
}
