use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;

/// Error returned by the JSON proxy endpoints.
/// Every failure collapses to `{ "error": <generic message> }`; only the status varies.
#[derive(Debug, Error)]
pub enum AppError {
    /// The backend answered with a non-2xx status, which is mirrored to the caller.
    #[error("{message} (backend status {status})")]
    Upstream {
        status: StatusCode,
        message: &'static str,
    },

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(BackendError),
}

impl AppError {
    /// Maps a backend failure, keeping its status only when the backend itself answered.
    pub fn from_backend(err: BackendError, upstream_message: &'static str) -> Self {
        match err {
            BackendError::Status { status, .. } => AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: upstream_message,
            },
            other => AppError::Backend(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Upstream { status, message } => {
                tracing::warn!("Backend returned {status}");
                (*status, *message)
            }
            AppError::MalformedBody(e) => {
                tracing::error!("Malformed request body: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Backend(e) => {
                tracing::error!("Backend error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
