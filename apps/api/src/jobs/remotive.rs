//! Remotive — JSON API source.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::jobs::models::{JobListing, JobSourceKind};
use crate::jobs::source::{get_text, FetchError, JobSource};

#[derive(Debug, Deserialize)]
struct RemotivePayload {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

/// Raw upstream record. Every field is optional; absent ones normalize to "".
#[derive(Debug, Default, Deserialize)]
struct RemotiveJob {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    publication_date: Option<String>,
}

impl From<RemotiveJob> for JobListing {
    fn from(job: RemotiveJob) -> Self {
        let local_id = match job.id {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        JobListing {
            id: format!("{}_{local_id}", JobSourceKind::Remotive),
            title: job.title.unwrap_or_default(),
            company: job.company_name.unwrap_or_default(),
            description: job.description.unwrap_or_default(),
            url: job.url.unwrap_or_default(),
            published_at: job.publication_date.unwrap_or_default(),
            source: JobSourceKind::Remotive,
        }
    }
}

/// Parses a Remotive API body into normalized listings, preserving upstream order.
pub fn parse_payload(body: &str) -> Result<Vec<JobListing>, FetchError> {
    let payload: RemotivePayload = serde_json::from_str(body)?;
    Ok(payload.jobs.into_iter().map(JobListing::from).collect())
}

pub struct RemotiveSource {
    client: Client,
    api_url: String,
}

impl RemotiveSource {
    pub fn new(client: Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl JobSource for RemotiveSource {
    fn kind(&self) -> JobSourceKind {
        JobSourceKind::Remotive
    }

    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError> {
        let body = get_text(&self.client, &self.api_url).await?;
        let listings = parse_payload(&body)?;
        info!(source = "remotive", count = listings.len(), "Fetched listings");
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::jobs::source::build_http_client;

    const SAMPLE: &str = r#"{
        "job-count": 2,
        "jobs": [
            {
                "id": 1912345,
                "url": "https://remotive.com/remote-jobs/software-dev/rust-engineer-1912345",
                "title": "Senior Rust Engineer",
                "company_name": "Ferrous Labs",
                "category": "Software Development",
                "publication_date": "2024-05-02T10:11:12",
                "description": "<p>Build async services in Rust.</p>"
            },
            {
                "id": "abc",
                "title": "Python Developer"
            }
        ]
    }"#;

    #[test]
    fn test_parse_payload_renames_fields() {
        let listings = parse_payload(SAMPLE).unwrap();
        assert_eq!(listings.len(), 2);

        let first = &listings[0];
        assert_eq!(first.id, "remotive_1912345");
        assert_eq!(first.title, "Senior Rust Engineer");
        assert_eq!(first.company, "Ferrous Labs");
        assert_eq!(first.description, "<p>Build async services in Rust.</p>");
        assert_eq!(
            first.url,
            "https://remotive.com/remote-jobs/software-dev/rust-engineer-1912345"
        );
        assert_eq!(first.published_at, "2024-05-02T10:11:12");
        assert_eq!(first.source, JobSourceKind::Remotive);
    }

    #[test]
    fn test_parse_payload_defaults_missing_fields_to_empty() {
        let listings = parse_payload(SAMPLE).unwrap();
        let sparse = &listings[1];
        assert_eq!(sparse.id, "remotive_abc");
        assert_eq!(sparse.company, "");
        assert_eq!(sparse.description, "");
        assert_eq!(sparse.url, "");
        assert_eq!(sparse.published_at, "");
    }

    #[test]
    fn test_parse_payload_without_jobs_key_is_empty() {
        assert!(parse_payload(r#"{"job-count": 0}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_payload_rejects_malformed_json() {
        assert!(matches!(
            parse_payload("<html>rate limited</html>"),
            Err(FetchError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent_and_normalizes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/remote-jobs")
            .match_header("user-agent", "test-agent/1.0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE)
            .create_async()
            .await;

        let client = build_http_client("test-agent/1.0", Duration::from_secs(5)).unwrap();
        let source = RemotiveSource::new(client, format!("{}/api/remote-jobs", server.url()));

        let listings = source.fetch().await.unwrap();
        assert_eq!(listings.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_reports_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/remote-jobs")
            .with_status(502)
            .create_async()
            .await;

        let client = build_http_client("test-agent/1.0", Duration::from_secs(5)).unwrap();
        let source = RemotiveSource::new(client, format!("{}/api/remote-jobs", server.url()));

        assert!(matches!(
            source.fetch().await,
            Err(FetchError::Status { status: 502 })
        ));
    }
}
