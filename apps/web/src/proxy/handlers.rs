use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tracing::info;

use crate::backend::Endpoint;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/search
pub async fn handle_search(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    relay(&state, Endpoint::Search, &body, "Search failed").await
}

/// POST /api/similar-jobs
pub async fn handle_similar_jobs(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    relay(&state, Endpoint::SimilarJobs, &body, "Similar jobs search failed").await
}

/// Forwards the incoming JSON body unchanged and relays the backend's reply.
/// The body is taken as raw bytes so a malformed payload maps to the same
/// generic 500 as any other failure instead of axum's extractor rejection.
async fn relay(
    state: &AppState,
    endpoint: Endpoint,
    body: &[u8],
    upstream_message: &'static str,
) -> Result<Json<Value>, AppError> {
    let body: Value = serde_json::from_slice(body)?;
    info!("Forwarding request to {}", endpoint.path());

    let reply = state
        .backend
        .forward(endpoint, &body)
        .await
        .map_err(|e| AppError::from_backend(e, upstream_message))?;

    Ok(Json(reply))
}
