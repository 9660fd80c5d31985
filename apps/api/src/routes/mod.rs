pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

/// Resume uploads larger than this are rejected before extraction.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume matching
        .route("/upload", post(matching::handle_upload))
        .route("/cold-email", post(matching::handle_cold_email))
        // Job aggregation
        .route("/jobs", get(jobs::handle_list_jobs))
        .route("/jobs/remotive", get(jobs::handle_remotive_jobs))
        .route("/jobs/weworkremotely", get(jobs::handle_weworkremotely_jobs))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
