use crate::backend::BackendClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            backend: BackendClient::new(config.backend_api_url.clone()),
        }
    }

    #[cfg(test)]
    pub fn for_backend(base_url: String) -> Self {
        Self {
            backend: BackendClient::new(base_url),
        }
    }
}
