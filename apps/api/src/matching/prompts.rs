// Prompt templates for fit evaluation and cold-email drafting.
// Placeholders: {resume}, {jd}. Both are filled in a single pass so text
// inside the resume is never re-interpreted as a placeholder.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

pub const MATCH_PROMPT_FILE: &str = "match_prompt.txt";
pub const COLD_EMAIL_PROMPT_FILE: &str = "cold_email_prompt.txt";

/// Fit-evaluation template. The model is asked for an `N/10` score first so
/// the score parser finds it.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"You are an experienced technical recruiter.

Compare the candidate's resume with the job description below.

Start your answer with a fit score in the form "N/10", where 10 means the
candidate meets every requirement. Then give:
- the strongest points of alignment,
- the most important gaps,
- concrete suggestions to improve the resume for this role.

RESUME:
{resume}

JOB DESCRIPTION:
{jd}"#;

/// Cold-email template. The model's reply is returned verbatim.
pub const COLD_EMAIL_PROMPT_TEMPLATE: &str = r#"Write a short, friendly cold email from the candidate to the hiring manager for the role below.

Keep it under 200 words. Mention two or three concrete, relevant achievements
taken from the resume. Do not invent experience. End with a clear request for
a short call. Include a subject line.

RESUME:
{resume}

JOB DESCRIPTION:
{jd}"#;

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub fit: String,
    pub cold_email: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            fit: MATCH_PROMPT_TEMPLATE.to_string(),
            cold_email: COLD_EMAIL_PROMPT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Built-in templates, each overridable by a file in `dir`.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let mut templates = Self::default();
        let Some(dir) = dir else {
            return Ok(templates);
        };

        if let Some(fit) = read_override(dir, MATCH_PROMPT_FILE)? {
            templates.fit = fit;
        }
        if let Some(cold_email) = read_override(dir, COLD_EMAIL_PROMPT_FILE)? {
            templates.cold_email = cold_email;
        }
        Ok(templates)
    }

    pub fn fit_prompt(&self, resume: &str, jd: &str) -> String {
        fill(&self.fit, resume, jd)
    }

    pub fn cold_email_prompt(&self, resume: &str, jd: &str) -> String {
        fill(&self.cold_email, resume, jd)
    }
}

fn read_override(dir: &Path, file: &str) -> Result<Option<String>> {
    let path = dir.join(file);
    if !path.is_file() {
        return Ok(None);
    }
    let template = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read prompt template {}", path.display()))?;

    for placeholder in ["{resume}", "{jd}"] {
        if !template.contains(placeholder) {
            warn!("Prompt template {} has no {placeholder} placeholder", path.display());
        }
    }
    info!("Loaded prompt template override from {}", path.display());
    Ok(Some(template))
}

fn fill(template: &str, resume: &str, jd: &str) -> String {
    template
        .split("{resume}")
        .map(|part| part.replace("{jd}", jd))
        .collect::<Vec<_>>()
        .join(resume)
}
