use std::sync::Arc;

use crate::jobs::aggregator::JobAggregator;
use crate::llm_client::ChatModel;
use crate::matching::prompts::PromptTemplates;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; nothing in it is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Chat model used by fit scoring and cold-email drafting. Default: `LlmClient`.
    pub llm: Arc<dyn ChatModel>,
    pub prompts: Arc<PromptTemplates>,
    pub jobs: JobAggregator,
}
