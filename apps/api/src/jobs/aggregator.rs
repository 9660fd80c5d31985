//! Job Aggregator — concurrent fan-out over every configured source.
//!
//! Flow: spawn one fetch task per source → await all in registration order →
//! collapse per-source failures to empty (logged) → merge → newest first.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::jobs::models::{JobListing, JobSourceKind};
use crate::jobs::remotive::RemotiveSource;
use crate::jobs::source::{build_http_client, FetchError, JobSource};
use crate::jobs::weworkremotely::WeWorkRemotelySource;

#[derive(Clone)]
pub struct JobAggregator {
    sources: Vec<Arc<dyn JobSource>>,
}

impl JobAggregator {
    pub fn new(sources: Vec<Arc<dyn JobSource>>) -> Self {
        Self { sources }
    }

    /// Wires the two production sources around one shared HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = build_http_client(&config.scraper_user_agent, config.fetch_timeout)?;
        Ok(Self::new(vec![
            Arc::new(RemotiveSource::new(
                client.clone(),
                config.remotive_api_url.clone(),
            )),
            Arc::new(WeWorkRemotelySource::new(
                client,
                config.weworkremotely_url.clone(),
            )),
        ]))
    }

    /// Tags of every configured source, in registration order.
    pub fn kinds(&self) -> Vec<JobSourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    /// Union of every source, newest `published_at` first.
    ///
    /// Never fails: a source that errors or panics contributes nothing and the
    /// cause is logged.
    pub async fn fetch_all(&self) -> Vec<JobListing> {
        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                (source.kind(), tokio::spawn(async move { source.fetch().await }))
            })
            .collect();

        let mut listings = Vec::new();
        for (kind, handle) in handles {
            let result = handle
                .await
                .unwrap_or_else(|e| Err(FetchError::Aborted(e.to_string())));
            match result {
                Ok(mut batch) => listings.append(&mut batch),
                Err(e) => warn!(source = %kind, error = %e, "Job source failed; contributing no listings"),
            }
        }

        sort_newest_first(&mut listings);
        info!(total = listings.len(), "Aggregated job listings");
        listings
    }

    /// Listings from one named source, in upstream order. Errors are returned.
    pub async fn fetch_source(&self, kind: JobSourceKind) -> Result<Vec<JobListing>, FetchError> {
        let source = self
            .sources
            .iter()
            .find(|s| s.kind() == kind)
            .ok_or(FetchError::NotConfigured(kind))?;
        source.fetch().await
    }
}

/// Descending byte-wise order on the ISO-8601 string; empty stamps sort last.
/// Stable, so equal stamps keep merge order.
pub fn sort_newest_first(listings: &mut [JobListing]) {
    listings.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}
