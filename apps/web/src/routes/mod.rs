pub mod fragments;
pub mod health;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::proxy::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::handle_page))
        .route("/health", get(health::health_handler))
        // HTML fragments the page script loads in place
        .route(
            "/fragments/similar-jobs",
            get(fragments::handle_similar_jobs_fragment),
        )
        // Browser-facing proxy to the search backend
        .route("/api/search", post(handlers::handle_search))
        .route("/api/similar-jobs", post(handlers::handle_similar_jobs))
        .with_state(state)
}
