//! Job Search Provider Client
//!
//! Seam for the external multi-site job scraper. The production
//! implementation talks to a JobSpy-compatible HTTP service; tests substitute
//! their own [`JobSearchProvider`] with canned results.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters for one provider search across a set of marketplaces.
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    pub site_name: Vec<String>,
    pub search_term: String,
    pub location: String,
    pub results_wanted: u32,
    pub hours_old: u32,
    pub country_indeed: String,
}

/// One raw listing as returned by the provider, before any policy is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedJob {
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default)]
    pub job_url: String,
    #[serde(default)]
    pub min_amount: Option<f64>,
    #[serde(default)]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub salary_source: Option<String>,
    #[serde(default)]
    pub is_remote: Option<bool>,
}

/// Error type for provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// An external source of scraped job listings. A single search is attempted
/// once, never retried; any failure aborts the reconciliation that issued it.
#[async_trait]
pub trait JobSearchProvider: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<Vec<ScrapedJob>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    jobs: Vec<ScrapedJob>,
}

/// HTTP client for a JobSpy-compatible scraping service.
pub struct JobSpyClient {
    http: reqwest::Client,
    base_url: String,
}

impl JobSpyClient {
    /// Create a new client. The long timeout reflects that one search fans
    /// out to four marketplaces on the provider side.
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("jobdash/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(180))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl JobSearchProvider for JobSpyClient {
    async fn search(&self, params: &SearchParams) -> Result<Vec<ScrapedJob>, ProviderError> {
        let url = format!("{}/api/v1/search_jobs", self.base_url);

        let response = self.http.post(&url).json(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Unavailable(format!(
                "provider returned {status}: {body}"
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(parsed.jobs)
    }
}
