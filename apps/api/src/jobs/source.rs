use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::jobs::models::{JobListing, JobSourceKind};

/// Why a single upstream source produced no listings.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid source url '{url}': {reason}")]
    Url { url: String, reason: String },

    #[error("fetch task aborted: {0}")]
    Aborted(String),

    #[error("source '{0}' is not configured")]
    NotConfigured(JobSourceKind),
}

/// One upstream provider of remote-job listings.
///
/// Implementations perform exactly one request per call and normalize the
/// result; they never swallow their own errors. Degrading a failure to an
/// empty list is the aggregator's job.
#[async_trait]
pub trait JobSource: Send + Sync {
    fn kind(&self) -> JobSourceKind;

    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError>;
}

/// Builds the HTTP client shared by every scraper/API source.
/// Carries the browser-like `User-Agent` some listing sites insist on.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?)
}

/// GETs `url` and returns the body, treating any non-2xx status as a failure.
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}
