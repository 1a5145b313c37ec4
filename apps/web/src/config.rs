use anyhow::{Context, Result};

const DEFAULT_BACKEND_API_URL: &str = "http://localhost:8080";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so an empty environment still starts a dev server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the semantic search backend, without a trailing slash.
    pub backend_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_api_url: normalize_base_url(
                &std::env::var("BACKEND_API_URL")
                    .unwrap_or_else(|_| DEFAULT_BACKEND_API_URL.to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw.trim())
        .with_context(|| format!("BACKEND_API_URL '{raw}' is not a valid URL"))?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        assert_eq!(
            normalize_base_url("http://search.internal:8080/").unwrap(),
            "http://search.internal:8080"
        );
        assert_eq!(
            normalize_base_url(DEFAULT_BACKEND_API_URL).unwrap(),
            DEFAULT_BACKEND_API_URL
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(normalize_base_url("not a url").is_err());
    }
}
