//! Axum route handlers for the Jobs API.
//!
//! These endpoints never answer with an error status: failures come back as a
//! 200 whose body carries an `error` key next to an empty `jobs` list.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::jobs::filter::JobFilter;
use crate::jobs::models::{JobListing, JobSourceKind};
use crate::state::AppState;

pub const DEFAULT_LIMIT: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct JobsQuery {
    pub query: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobListing>,
    /// Matches before `limit` truncation.
    pub total: usize,
    pub sources: Vec<JobSourceKind>,
}

#[derive(Debug, Serialize)]
pub struct SourceJobsResponse {
    pub jobs: Vec<JobListing>,
    pub total: usize,
    pub source: JobSourceKind,
}

#[derive(Debug, Serialize)]
pub struct JobsErrorResponse {
    pub error: String,
    pub jobs: Vec<JobListing>,
    pub total: usize,
}

impl JobsErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            jobs: Vec::new(),
            total: 0,
        }
    }
}

impl IntoResponse for JobsErrorResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /jobs?query=&company=&source=&limit=
///
/// Aggregates every source, filters, then truncates to `limit` (default 50).
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    params: Result<Query<JobsQuery>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(q) => q,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected /jobs query string");
            return JobsErrorResponse::new(rejection.body_text()).into_response();
        }
    };

    let filter = JobFilter {
        query: params.query,
        company: params.company,
        source: params.source,
    };

    let mut jobs = filter.apply(state.jobs.fetch_all().await);
    let total = jobs.len();
    jobs.truncate(params.limit.unwrap_or(DEFAULT_LIMIT));

    Json(JobsResponse {
        jobs,
        total,
        sources: state.jobs.kinds(),
    })
    .into_response()
}

/// GET /jobs/remotive
pub async fn handle_remotive_jobs(State(state): State<AppState>) -> Response {
    source_jobs(&state, JobSourceKind::Remotive).await
}

/// GET /jobs/weworkremotely
pub async fn handle_weworkremotely_jobs(State(state): State<AppState>) -> Response {
    source_jobs(&state, JobSourceKind::WeWorkRemotely).await
}

async fn source_jobs(state: &AppState, kind: JobSourceKind) -> Response {
    match state.jobs.fetch_source(kind).await {
        Ok(jobs) => Json(SourceJobsResponse {
            total: jobs.len(),
            jobs,
            source: kind,
        })
        .into_response(),
        Err(e) => {
            warn!(source = %kind, error = %e, "Single-source job fetch failed");
            JobsErrorResponse::new(format!("Failed to fetch {kind} jobs: {e}")).into_response()
        }
    }
}
