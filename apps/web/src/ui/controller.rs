//! Page controller: owns the cross-cutting view state and drives the search,
//! view-details and see-more flows.
//!
//! Every request start hands out a generation number. An outcome is only applied
//! while its generation is still the latest one, so when two requests overlap the
//! last one *issued* wins, never merely the last one to resolve.

use tracing::{debug, warn};

use crate::backend::{BackendError, JobSearchApi};
use crate::models::job::without_job;
use crate::models::search::RESULT_LIMIT;
use crate::models::{JobResult, SearchRequest, SearchResponse, SimilarJobsRequest};

pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";
pub const SIMILAR_FAILED_MESSAGE: &str = "Failed to load similar jobs";
const UNKNOWN_ORIGIN_TITLE: &str = "this job";

/// Status of the result list. Loading and error are exclusive by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub query: String,
    pub results: Vec<JobResult>,
    pub response: Option<SearchResponse>,
    pub status: ResultsStatus,
    pub has_searched: bool,
    /// The job shown in the details modal; the modal is open iff this is set.
    pub selected: Option<JobResult>,
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        self.status == ResultsStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ResultsStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_modal_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_job(&self) -> Option<&JobResult> {
        self.selected.as_ref()
    }

    /// Results area is shown once a search has been made and nothing is in flight.
    pub fn shows_results_area(&self) -> bool {
        self.has_searched && !self.is_loading()
    }

    /// "No jobs found": a finished search with nothing to show and no error.
    pub fn shows_empty_state(&self) -> bool {
        self.shows_results_area() && self.results.is_empty() && self.error().is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// A search that has been started and is waiting for its outcome.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    pub generation: Generation,
    pub request: SearchRequest,
}

/// A see-more request that has been started and is waiting for its outcome.
#[derive(Debug, Clone)]
pub struct PendingSeeMore {
    pub generation: Generation,
    pub origin_title: String,
    pub request: SimilarJobsRequest,
}

pub struct PageController<A> {
    api: A,
    state: ViewState,
    latest: Generation,
}

impl<A: JobSearchApi> PageController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ViewState::default(),
            latest: Generation(0),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Resets the page to its pre-search look.
    pub fn clear_query(&mut self) {
        self.state.query.clear();
        self.state.results.clear();
        self.state.response = None;
        self.state.has_searched = false;
        self.state.status = ResultsStatus::Idle;
    }

    fn next_generation(&mut self) -> Generation {
        self.latest = Generation(self.latest.0 + 1);
        self.latest
    }

    /// Starts a search. Blank or whitespace-only queries are ignored.
    pub fn begin_search(&mut self, query: &str) -> Option<PendingSearch> {
        if query.trim().is_empty() {
            return None;
        }

        self.state.query = query.to_string();
        self.state.status = ResultsStatus::Loading;
        self.state.has_searched = true;

        Some(PendingSearch {
            generation: self.next_generation(),
            request: SearchRequest::new(query),
        })
    }

    /// Applies a search outcome. Returns false when a newer request superseded it.
    pub fn apply_search(
        &mut self,
        pending: PendingSearch,
        outcome: Result<SearchResponse, BackendError>,
    ) -> bool {
        if pending.generation != self.latest {
            debug!(
                "Discarding stale search outcome for '{}'",
                pending.request.natural_query
            );
            return false;
        }

        match outcome {
            Ok(response) => {
                self.state.results = response.entries.clone();
                self.state.response = Some(response);
                self.state.status = ResultsStatus::Success;
            }
            Err(e) => {
                warn!("Search failed: {e}");
                self.state.results.clear();
                self.state.response = None;
                self.state.status = ResultsStatus::Error(SEARCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    pub async fn search(&mut self, query: &str) {
        let Some(pending) = self.begin_search(query) else {
            return;
        };
        let outcome = self.api.search(&pending.request).await;
        self.apply_search(pending, outcome);
    }

    pub fn view_details(&mut self, job: JobResult) {
        self.state.selected = Some(job);
    }

    pub fn close_modal(&mut self) {
        self.state.selected = None;
    }

    /// Swaps the job shown in an open modal. Does nothing while the modal is closed.
    pub fn select_job_in_modal(&mut self, job: JobResult) {
        if self.state.is_modal_open() {
            self.state.selected = Some(job);
        }
    }

    /// Starts a "see more" listing of jobs similar to `job_id`.
    pub fn begin_see_more(&mut self, job_id: &str) -> PendingSeeMore {
        let origin_title = self
            .state
            .selected
            .as_ref()
            .map(|j| j.fields.job_title.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_ORIGIN_TITLE)
            .to_string();

        self.close_modal();
        self.state.results.clear();
        self.state.response = None;
        self.state.status = ResultsStatus::Loading;
        self.state.has_searched = true;

        PendingSeeMore {
            generation: self.next_generation(),
            origin_title,
            request: SimilarJobsRequest::new(job_id, RESULT_LIMIT),
        }
    }

    /// Applies a see-more outcome. Returns false when a newer request superseded it.
    pub fn apply_see_more(
        &mut self,
        pending: PendingSeeMore,
        outcome: Result<SearchResponse, BackendError>,
    ) -> bool {
        if pending.generation != self.latest {
            debug!("Discarding stale similar-jobs outcome for {}", pending.request.id);
            return false;
        }

        match outcome {
            Ok(mut response) => {
                response.entries = without_job(response.entries, &pending.request.id);
                self.state.results = response.entries.clone();
                self.state.response = Some(response);
                self.state.query = format!("Similar jobs to: {}", pending.origin_title);
                self.state.status = ResultsStatus::Success;
            }
            Err(e) => {
                warn!("Error fetching similar jobs: {e}");
                self.state.status = ResultsStatus::Error(SIMILAR_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    pub async fn see_more(&mut self, job_id: &str) {
        let pending = self.begin_see_more(job_id);
        let outcome = self.api.similar_jobs(&pending.request).await;
        self.apply_see_more(pending, outcome);
    }
}
