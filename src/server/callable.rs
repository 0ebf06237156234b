//! Callable-function wire envelope.
//!
//! Requests carry their arguments under `data`; responses carry either
//! `result` or `error: { status, message }`.

use crate::types::GatewayError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Canonical error status carried in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorStatus {
    InvalidArgument,
    Internal,
}

impl ErrorStatus {
    /// HTTP status for this error.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs and span outcomes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::Internal => "internal",
        }
    }
}

/// Error returned from a callable.
#[derive(Debug)]
pub struct CallableError {
    pub status: ErrorStatus,
    pub message: String,
}

impl From<GatewayError> for CallableError {
    fn from(err: GatewayError) -> Self {
        let status = if err.is_client_error() {
            ErrorStatus::InvalidArgument
        } else {
            ErrorStatus::Internal
        };
        let message = match err {
            // Both already carry their caller-facing text.
            GatewayError::InvalidArgument(msg) | GatewayError::LlmError(msg) => msg,
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "status": self.status,
                "message": self.message,
            }
        });
        (self.status.http_status(), Json(body)).into_response()
    }
}

/// Successful callable result.
#[derive(Debug)]
pub struct CallableResponse<T>(pub T);

impl<T: Serialize> IntoResponse for CallableResponse<T> {
    fn into_response(self) -> Response {
        Json(json!({ "result": self.0 })).into_response()
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Decode the `data` field of a callable request body.
///
/// # Errors
///
/// `INVALID_ARGUMENT` if the body is not JSON, lacks `data`, or `data` does
/// not match the expected shape
pub fn parse_data<T: DeserializeOwned>(body: &[u8]) -> Result<T, CallableError> {
    let envelope: Envelope<T> = serde_json::from_slice(body)
        .map_err(|e| GatewayError::invalid_argument(format!("Invalid request: {}", e)))?;
    Ok(envelope.data)
}
