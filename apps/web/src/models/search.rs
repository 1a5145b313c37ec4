use serde::{Deserialize, Serialize};

use crate::models::filters::DetectedFilters;
use crate::models::job::JobResult;

/// Page size for both the primary search and the "see more" listing.
pub const RESULT_LIMIT: u32 = 25;
/// Page size for the in-modal similar-jobs carousel.
pub const CAROUSEL_LIMIT: u32 = 10;

pub const DESCRIPTION_WEIGHT: f64 = 0.8;
pub const TITLE_WEIGHT: f64 = 1.0;
pub const SKILLS_WEIGHT: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub natural_query: String,
    pub limit: u32,
}

impl SearchRequest {
    pub fn new(natural_query: impl Into<String>) -> Self {
        Self {
            natural_query: natural_query.into(),
            limit: RESULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarJobsRequest {
    pub id: String,
    pub limit: u32,
    pub description_weight: f64,
    pub title_weight: f64,
    pub skills_weight: f64,
}

impl SimilarJobsRequest {
    /// Similar-jobs request with the fixed product weighting.
    pub fn new(id: impl Into<String>, limit: u32) -> Self {
        Self {
            id: id.into(),
            limit,
            description_weight: DESCRIPTION_WEIGHT,
            title_weight: TITLE_WEIGHT,
            skills_weight: SKILLS_WEIGHT,
        }
    }
}

/// Ranked entries plus the filters the backend detected. `entries` order is
/// authoritative and is never re-sorted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub entries: Vec<JobResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SearchMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_vector: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_params: Option<DetectedFilters>,
}

impl SearchResponse {
    pub fn detected_filters(&self) -> Option<&DetectedFilters> {
        self.metadata.as_ref()?.search_params.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_wire_shape() {
        let body = serde_json::to_value(SearchRequest::new("Data Analyst jobs in New York")).unwrap();
        assert_eq!(
            body,
            json!({ "natural_query": "Data Analyst jobs in New York", "limit": 25 })
        );
    }

    #[test]
    fn test_similar_jobs_request_wire_shape() {
        let body = serde_json::to_value(SimilarJobsRequest::new("job-7", RESULT_LIMIT)).unwrap();
        assert_eq!(
            body,
            json!({
                "id": "job-7",
                "limit": 25,
                "description_weight": 0.8,
                "title_weight": 1.0,
                "skills_weight": 0.9
            })
        );
    }

    #[test]
    fn test_response_without_entries_or_metadata() {
        let response: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.entries.is_empty());
        assert!(response.detected_filters().is_none());
    }

    #[test]
    fn test_response_keeps_backend_order() {
        let response: SearchResponse = serde_json::from_value(json!({
            "entries": [
                { "id": "low", "fields": {}, "metadata": { "score": 0.1 } },
                { "id": "high", "fields": {}, "metadata": { "score": 0.9 } }
            ],
            "metadata": {
                "schema_name": "job",
                "search_params": { "title": "Analyst" }
            }
        }))
        .unwrap();
        let ids: Vec<&str> = response.entries.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["low", "high"]);
        assert_eq!(response.detected_filters().unwrap().chips().len(), 1);
    }
}
