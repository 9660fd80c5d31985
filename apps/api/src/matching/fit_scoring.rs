//! Fit Scoring — asks the model to rate resume-vs-JD fit and reads a 0–10
//! score out of its free-text reply.
//!
//! Score extraction tries three patterns in precedence order; the first
//! pattern that matches anywhere wins, and within it the leftmost hit:
//!   1. `N/10`          (N = 0..=10, decimals truncated: "8.5/10" → 8;
//!                       letters may touch the digits: "rated8/10", "匹配度8/10")
//!   2. `N out of 10`   (N = 1..=10)
//!   3. a bare `1`–`10` as a whole word
//! No hit means "could not parse" and is reported as 0.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::matching::prompts::PromptTemplates;

/// Parsed model verdict. `feedback` is the whole reply, unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FitResult {
    pub score: u8,
    pub feedback: String,
}

fn score_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // digit guards instead of \b: CJK and `_` are word characters
            Regex::new(r"(?:^|[^\d.])(\d{1,2})(?:\.\d+)?\s*/\s*10(?:$|\D)").expect("valid regex"),
            Regex::new(r"(?i)\b(10|[1-9])\s+out\s+of\s+10\b").expect("valid regex"),
            Regex::new(r"\b(10|[1-9])\b").expect("valid regex"),
        ]
    })
}

/// Returns the first score found, or `None` when the reply carries no score.
pub fn extract_score(text: &str) -> Option<u8> {
    score_patterns().iter().find_map(|pattern| {
        pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u8>().ok())
            .find(|score| *score <= 10)
    })
}

/// Never fails: an unscored reply becomes `score: 0` with the text as feedback.
pub fn parse_fit_response(text: impl Into<String>) -> FitResult {
    let feedback = text.into();
    let score = match extract_score(&feedback) {
        Some(score) => {
            info!(score, "Fit evaluated");
            score
        }
        None => {
            warn!("Model reply carried no recognizable score; reporting 0");
            0
        }
    };
    FitResult { score, feedback }
}

/// Builds the fit prompt, calls the model once, parses the reply.
///
/// Model failures propagate as `AppError::Llm`; there is no retry.
pub async fn evaluate_fit(
    llm: &dyn ChatModel,
    prompts: &PromptTemplates,
    resume_text: &str,
    jd_text: &str,
) -> Result<FitResult, AppError> {
    let prompt = prompts.fit_prompt(resume_text, jd_text);
    let reply = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Fit evaluation failed: {e}")))?;

    Ok(parse_fit_response(reply))
}
