use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::backend::JobSearchApi;
use crate::models::job::JobFields;
use crate::models::JobResult;
use crate::render::{render_page, ModalPath, PageView};
use crate::state::AppState;
use crate::ui::{JobDetailsModal, PageController, SearchSection};

/// Query string of `/`. Every field is a plain string so a mangled link still serves
/// a page instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub q: Option<String>,
    pub similar_to: Option<String>,
    pub title: Option<String>,
    /// Index into the example queries.
    pub example: Option<String>,
    /// Job whose details are open, as written back by the page script.
    pub job: Option<String>,
    /// JSON array of job ids picked from successive carousels after `job`.
    pub trail: Option<String>,
}

/// What the results area shows, decided from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Listing {
    None,
    /// `q` was submitted empty.
    Cleared,
    Search { query: String },
    Similar { id: String, title: String },
}

impl PageParams {
    fn listing(&self) -> Listing {
        if let Some(id) = self.similar_to.as_deref().filter(|id| !id.is_empty()) {
            return Listing::Similar {
                id: id.to_string(),
                title: self.title.clone().unwrap_or_default(),
            };
        }
        match self.q.as_deref().map(str::trim) {
            Some("") => Listing::Cleared,
            Some(q) => Listing::Search {
                query: q.to_string(),
            },
            None => Listing::None,
        }
    }

    fn example_index(&self) -> Option<usize> {
        self.example.as_deref()?.trim().parse().ok()
    }

    fn trail(&self) -> Vec<String> {
        self.trail
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

/// GET /
/// Runs the search or "see more" listing named by the query string and renders the
/// page. Everything after that (details, carousel, toggles) happens in the browser.
pub async fn handle_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Html<String> {
    Html(build_page(state.backend.clone(), &params).await)
}

pub async fn build_page<A: JobSearchApi>(api: A, params: &PageParams) -> String {
    let mut page = PageController::new(api);

    match params.listing() {
        Listing::None => {}
        Listing::Cleared => {
            debug!("Empty query submitted; resetting page");
            page.clear_query();
        }
        Listing::Search { query } => {
            info!("Page search: {query}");
            page.search(&query).await;
        }
        Listing::Similar { id, title } => {
            info!("Page similar-jobs listing for {id}");
            page.view_details(origin_stub(&id, &title));
            page.see_more(&id).await;
        }
    }

    let mut search = SearchSection::new(page.state().query.clone());
    if let Some(index) = params.example_index() {
        search.choose_example(index);
    }

    let mut modal = None;
    if let Some(job_id) = params.job.as_deref().filter(|id| !id.is_empty()) {
        if let Some(job) = find_job(&page.state().results, job_id) {
            page.view_details(job.clone());
            let mut opened = JobDetailsModal::open(job, page.api()).await;
            let mut path = ModalPath::new(job_id);

            for picked_id in params.trail() {
                let Some(picked) = find_job(opened.carousel().jobs(), &picked_id) else {
                    debug!("Carousel pick {picked_id} no longer offered; stopping");
                    break;
                };
                opened.select_job(picked.clone(), page.api()).await;
                page.select_job_in_modal(picked);
                path = path.then(&picked_id);
            }

            modal = Some((opened, path));
        } else {
            debug!("Job {job_id} not in current results; modal stays closed");
        }
    }

    render_page(&PageView {
        state: page.state(),
        search: &search,
        modal: modal.as_ref().map(|(m, p)| (m, p)),
    })
}

fn find_job(jobs: &[JobResult], id: &str) -> Option<JobResult> {
    jobs.iter().find(|j| j.id == id).cloned()
}

/// Stand-in for the job whose modal was open when "see more" was clicked; only its
/// id and title matter to the see-more flow.
fn origin_stub(id: &str, title: &str) -> JobResult {
    JobResult {
        id: id.to_string(),
        fields: JobFields {
            job_title: title.to_string(),
            ..Default::default()
        },
        metadata: Default::default(),
    }
}
