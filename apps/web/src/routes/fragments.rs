use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::debug;

use crate::backend::JobSearchApi;
use crate::render::modal::render_carousel;
use crate::state::AppState;
use crate::ui::SimilarJobsCarousel;

#[derive(Debug, Default, Deserialize)]
pub struct SimilarJobsParams {
    pub id: Option<String>,
    /// Title of the origin job, carried into the "see more" link.
    pub title: Option<String>,
}

/// GET /fragments/similar-jobs
/// Carousel markup for one job, requested by the page script when its details open.
pub async fn handle_similar_jobs_fragment(
    State(state): State<AppState>,
    Query(params): Query<SimilarJobsParams>,
) -> Html<String> {
    Html(similar_jobs_fragment(&state.backend, &params).await)
}

pub async fn similar_jobs_fragment<A: JobSearchApi + ?Sized>(
    api: &A,
    params: &SimilarJobsParams,
) -> String {
    let Some(id) = params.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) else {
        debug!("Similar-jobs fragment requested without a job id");
        return String::new();
    };

    let mut carousel = SimilarJobsCarousel::new(id);
    carousel.load(api).await;
    render_carousel(&carousel, params.title.as_deref().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::models::job::sample_job;
    use crate::routes::build_router;
    use crate::test_support::{job_json, spawn_backend, MockBackend};
    use crate::ui::controller::fakes::FakeApi;

    fn params(id: &str, title: &str) -> SimilarJobsParams {
        SimilarJobsParams {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
        }
    }

    #[tokio::test]
    async fn test_fragment_fetches_similar_jobs_only() {
        let api = FakeApi::returning(vec![sample_job("1", "One"), sample_job("2", "Two")]);
        let html = similar_jobs_fragment(&api, &params("1", "One")).await;

        assert!(html.contains("data-select-job=\"2\""));
        assert!(!html.contains("data-select-job=\"1\""));
        assert!(html.contains("href=\"/?similar_to=1&amp;title=One\""));
        assert!(api.searches.lock().unwrap().is_empty());
        let similar = api.similar.lock().unwrap().clone();
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].limit, 10);
    }

    #[tokio::test]
    async fn test_failed_fetch_renders_nothing() {
        let html = similar_jobs_fragment(&FakeApi::failing(502), &params("1", "One")).await;
        assert!(html.is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_skips_backend() {
        let api = FakeApi::default();
        let html = similar_jobs_fragment(&api, &SimilarJobsParams::default()).await;
        assert!(html.is_empty());
        assert!(api.similar.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fragment_route_hits_similar_jobs_endpoint() {
        let mock = MockBackend::ok(json!({ "entries": [job_json("1", "One"), job_json("5", "Five")] }));
        let app = build_router(AppState::for_backend(spawn_backend(mock.clone()).await));

        let response = app
            .oneshot(
                Request::get("/fragments/similar-jobs?id=1&title=Data+Analyst")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("data-select-job=\"5\""));

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/api/v1/search/similar-jobs");
        assert_eq!(requests[0].body["id"], "1");
        assert_eq!(requests[0].header("x-include-metadata"), Some("true"));
    }
}
