//! Backend client: the single point of entry for calls to the semantic search backend.
//!
//! The proxy endpoints forward request bodies verbatim through `forward`; the
//! server-rendered page talks to the backend through the typed `JobSearchApi` seam.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{SearchRequest, SearchResponse, SimilarJobsRequest};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Backend search routes reachable through the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    SimilarJobs,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Search => "/api/v1/search/job",
            Endpoint::SimilarJobs => "/api/v1/search/similar-jobs",
        }
    }

    /// Similar-jobs responses only carry metadata when asked for it.
    fn include_metadata(self) -> bool {
        matches!(self, Endpoint::SimilarJobs)
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// No timeout is set; requests run with the transport defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs `body` unchanged to `endpoint` and returns the backend's JSON reply.
    /// No retries: one attempt, any non-2xx becomes `BackendError::Status`.
    pub async fn forward(&self, endpoint: Endpoint, body: &Value) -> Result<Value, BackendError> {
        let url = format!("{}{}", self.base_url, endpoint.path());

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("accept", "application/json");
        if endpoint.include_metadata() {
            request = request.header("x-include-metadata", "true");
        }

        let response = request.json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Backend {} returned {}: {}", endpoint.path(), status, body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)?;
        debug!("Backend {} answered {} bytes", endpoint.path(), bytes.len());
        Ok(value)
    }
}

/// Typed access to the two search operations. Implemented by `BackendClient`
/// for production and by in-memory fakes in tests.
#[async_trait]
pub trait JobSearchApi: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError>;

    async fn similar_jobs(
        &self,
        request: &SimilarJobsRequest,
    ) -> Result<SearchResponse, BackendError>;
}

#[async_trait]
impl<'a, T: JobSearchApi + ?Sized> JobSearchApi for &'a T {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError> {
        (**self).search(request).await
    }

    async fn similar_jobs(
        &self,
        request: &SimilarJobsRequest,
    ) -> Result<SearchResponse, BackendError> {
        (**self).similar_jobs(request).await
    }
}

#[async_trait]
impl JobSearchApi for BackendClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError> {
        let body = serde_json::to_value(request)?;
        let value = self.forward(Endpoint::Search, &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn similar_jobs(
        &self,
        request: &SimilarJobsRequest,
    ) -> Result<SearchResponse, BackendError> {
        let body = serde_json::to_value(request)?;
        let value = self.forward(Endpoint::SimilarJobs, &body).await?;
        Ok(serde_json::from_value(value)?)
    }
}
