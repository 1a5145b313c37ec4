//! Similar-jobs carousel shown inside the details modal.
//!
//! A window of `VISIBLE_SLOTS` slots slides over the fetched jobs plus one trailing
//! "see more" slot. The window start is clamped to `[0, total_slots - VISIBLE_SLOTS]`.
//! Every slot is rendered; the browser moves the window, so sliding never refetches.

use tracing::warn;

use crate::backend::{BackendError, JobSearchApi};
use crate::models::job::without_job;
use crate::models::search::CAROUSEL_LIMIT;
use crate::models::{JobResult, SearchResponse, SimilarJobsRequest};

pub const VISIBLE_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselSlot<'a> {
    Job(&'a JobResult),
    SeeMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselStatus {
    Loading,
    Ready,
    Failed,
}

/// What the carousel should draw right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselView {
    Hidden,
    Loading,
    Failed,
    Ready,
}

#[derive(Debug, Clone)]
pub struct SimilarJobsCarousel {
    origin_id: String,
    jobs: Vec<JobResult>,
    status: CarouselStatus,
    /// When set, a failed fetch hides the component instead of showing a notice.
    silent_failures: bool,
}

impl SimilarJobsCarousel {
    pub fn new(origin_id: impl Into<String>) -> Self {
        Self {
            origin_id: origin_id.into(),
            jobs: Vec::new(),
            status: CarouselStatus::Loading,
            silent_failures: true,
        }
    }

    pub fn with_silent_failures(mut self, silent: bool) -> Self {
        self.silent_failures = silent;
        self
    }

    pub fn origin_id(&self) -> &str {
        &self.origin_id
    }

    pub fn status(&self) -> &CarouselStatus {
        &self.status
    }

    pub fn jobs(&self) -> &[JobResult] {
        &self.jobs
    }

    pub fn request(&self) -> SimilarJobsRequest {
        SimilarJobsRequest::new(self.origin_id.clone(), CAROUSEL_LIMIT)
    }

    pub fn apply(&mut self, outcome: Result<SearchResponse, BackendError>) {
        match outcome {
            Ok(response) => {
                self.jobs = without_job(response.entries, &self.origin_id);
                self.status = CarouselStatus::Ready;
            }
            Err(e) => {
                warn!("Error fetching similar jobs for {}: {e}", self.origin_id);
                self.jobs.clear();
                self.status = CarouselStatus::Failed;
            }
        }
    }

    pub async fn load<A: JobSearchApi + ?Sized>(&mut self, api: &A) {
        self.status = CarouselStatus::Loading;
        let outcome = api.similar_jobs(&self.request()).await;
        self.apply(outcome);
    }

    /// Points the carousel at another job, refetching only if the id changed.
    pub async fn set_origin<A: JobSearchApi + ?Sized>(&mut self, origin_id: &str, api: &A) {
        if origin_id == self.origin_id && self.status != CarouselStatus::Loading {
            return;
        }
        self.origin_id = origin_id.to_string();
        self.jobs.clear();
        self.load(api).await;
    }

    pub fn view(&self) -> CarouselView {
        match self.status {
            CarouselStatus::Loading => CarouselView::Loading,
            CarouselStatus::Failed if self.silent_failures => CarouselView::Hidden,
            CarouselStatus::Failed => CarouselView::Failed,
            CarouselStatus::Ready if self.jobs.is_empty() => CarouselView::Hidden,
            CarouselStatus::Ready => CarouselView::Ready,
        }
    }

    /// Fetched jobs plus the trailing "see more" slot.
    pub fn total_slots(&self) -> usize {
        self.jobs.len() + 1
    }

    pub fn max_index(&self) -> usize {
        self.total_slots().saturating_sub(VISIBLE_SLOTS)
    }

    pub fn shows_navigation(&self) -> bool {
        self.total_slots() > VISIBLE_SLOTS
    }

    /// Clamps a requested window start into `[0, max_index]`.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.max_index())
    }

    pub fn can_go_prev(&self, index: usize) -> bool {
        self.clamp_index(index) > 0
    }

    pub fn can_go_next(&self, index: usize) -> bool {
        self.clamp_index(index) < self.max_index()
    }

    /// Whether slot number `slot` falls inside the window starting at `index`.
    pub fn is_visible(&self, slot: usize, index: usize) -> bool {
        let start = self.clamp_index(index);
        (start..start + VISIBLE_SLOTS).contains(&slot)
    }

    pub fn slots(&self) -> Vec<CarouselSlot<'_>> {
        self.jobs
            .iter()
            .map(CarouselSlot::Job)
            .chain(std::iter::once(CarouselSlot::SeeMore))
            .collect()
    }

    pub fn visible_slots(&self, index: usize) -> Vec<CarouselSlot<'_>> {
        self.slots()
            .into_iter()
            .skip(self.clamp_index(index))
            .take(VISIBLE_SLOTS)
            .collect()
    }
}
