#![allow(dead_code)]

pub mod filters;
pub mod job;
pub mod search;

pub use filters::DetectedFilters;
pub use job::JobResult;
pub use search::{SearchRequest, SearchResponse, SimilarJobsRequest};
