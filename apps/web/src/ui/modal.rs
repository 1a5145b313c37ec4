use url::form_urlencoded;

use crate::backend::JobSearchApi;
use crate::models::JobResult;
use crate::ui::carousel::SimilarJobsCarousel;

const WEB_SEARCH_URL: &str = "https://www.google.com/search";

/// Expanded single-job view. Hosts the similar-jobs carousel for the shown job.
///
/// Dismissal and the description clamp are handled in the browser; this type decides
/// what the modal shows and whether those controls exist.
#[derive(Debug, Clone)]
pub struct JobDetailsModal {
    job: JobResult,
    carousel: SimilarJobsCarousel,
}

impl JobDetailsModal {
    pub fn new(job: JobResult) -> Self {
        let carousel = SimilarJobsCarousel::new(job.id.clone());
        Self { job, carousel }
    }

    /// Opens the modal and fetches its carousel.
    pub async fn open<A: JobSearchApi + ?Sized>(job: JobResult, api: &A) -> Self {
        let mut modal = Self::new(job);
        modal.carousel.load(api).await;
        modal
    }

    pub fn job(&self) -> &JobResult {
        &self.job
    }

    pub fn carousel(&self) -> &SimilarJobsCarousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut SimilarJobsCarousel {
        &mut self.carousel
    }

    /// The page body must not scroll while the modal is showing.
    pub fn locks_background_scroll(&self) -> bool {
        true
    }

    pub fn has_description_toggle(&self) -> bool {
        self.job.has_long_summary()
    }

    /// Swaps the shown job without closing and points the carousel at it.
    pub async fn select_job<A: JobSearchApi + ?Sized>(&mut self, job: JobResult, api: &A) {
        let id = job.id.clone();
        self.job = job;
        self.carousel.set_origin(&id, api).await;
    }

    /// Where "Apply Now" goes: the posting itself, else a web search for it.
    pub fn apply_url(&self) -> String {
        apply_url(&self.job)
    }
}

pub fn apply_url(job: &JobResult) -> String {
    match job.link() {
        Some(link) => link.to_string(),
        None => {
            let terms = format!("{} {}", job.fields.job_title, job.fields.company);
            let encoded: String = form_urlencoded::byte_serialize(terms.as_bytes()).collect();
            format!("{WEB_SEARCH_URL}?q={encoded}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{sample_job, SUMMARY_PREVIEW_CHARS};
    use crate::ui::carousel::CarouselView;
    use crate::ui::controller::fakes::FakeApi;

    #[test]
    fn test_description_toggle_only_past_preview_length() {
        let mut job = sample_job("1", "One");
        job.fields.job_summary = "x".repeat(SUMMARY_PREVIEW_CHARS);
        assert!(!JobDetailsModal::new(job.clone()).has_description_toggle());

        job.fields.job_summary.push('x');
        let modal = JobDetailsModal::new(job);
        assert!(modal.has_description_toggle());
        assert!(modal.locks_background_scroll());
    }

    #[test]
    fn test_apply_prefers_job_link() {
        let mut job = sample_job("1", "Data Analyst");
        job.fields.job_link = Some("https://jobs.example.com/1".to_string());
        assert_eq!(apply_url(&job), "https://jobs.example.com/1");
    }

    #[test]
    fn test_apply_falls_back_to_web_search() {
        let mut job = sample_job("1", "Data Analyst");
        job.fields.company = "Acme & Co".to_string();
        job.fields.job_link = Some("  ".to_string());
        assert_eq!(
            apply_url(&job),
            "https://www.google.com/search?q=Data+Analyst+Acme+%26+Co"
        );
    }

    #[tokio::test]
    async fn test_select_job_swaps_without_closing_and_refetches() {
        let api = FakeApi::returning(vec![sample_job("2", "Two"), sample_job("3", "Three")]);
        api.push_ok(vec![sample_job("4", "Four")]);

        let mut modal = JobDetailsModal::open(sample_job("1", "One"), &api).await;
        assert_eq!(modal.carousel().view(), CarouselView::Ready);

        modal.select_job(sample_job("2", "Two"), &api).await;
        assert_eq!(modal.job().id, "2");
        assert_eq!(modal.carousel().origin_id(), "2");
        assert_eq!(modal.carousel().jobs()[0].id, "4");
    }
}
