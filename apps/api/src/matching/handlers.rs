//! Axum route handlers for the resume endpoints.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::cold_email::generate_cold_email;
use crate::matching::extract::{extract_text_blocking, DocumentFormat, ExtractError};
use crate::matching::fit_scoring::evaluate_fit;
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";
pub const JD_FIELD: &str = "jd";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub fit_score: u8,
    pub suggestions: String,
}

#[derive(Debug, Serialize)]
pub struct ColdEmailResponse {
    pub cold_email: String,
}

/// The two fields every resume endpoint takes.
#[derive(Debug)]
struct ResumeForm {
    resume: Bytes,
    content_type: Option<String>,
    file_name: Option<String>,
    jd: String,
}

async fn read_form(mut multipart: Multipart) -> Result<ResumeForm, AppError> {
    let mut resume = None;
    let mut jd = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let content_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume: {e}")))?;
                resume = Some((bytes, content_type, file_name));
            }
            Some(JD_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read jd: {e}")))?;
                jd = Some(text);
            }
            _ => {}
        }
    }

    let (resume, content_type, file_name) = resume
        .ok_or_else(|| AppError::Validation(format!("Missing '{RESUME_FIELD}' file field")))?;
    let jd = jd.ok_or_else(|| AppError::Validation(format!("Missing '{JD_FIELD}' field")))?;
    if jd.trim().is_empty() {
        return Err(AppError::Validation("jd cannot be empty".to_string()));
    }

    Ok(ResumeForm {
        resume,
        content_type,
        file_name,
        jd,
    })
}

async fn resume_text(form: &ResumeForm) -> Result<String, AppError> {
    let format = DocumentFormat::detect(
        form.content_type.as_deref(),
        form.file_name.as_deref(),
        &form.resume,
    )
    .ok_or_else(|| {
        AppError::Validation(format!(
            "Unsupported resume type {}; upload a PDF or plain text file",
            form.content_type.as_deref().unwrap_or("(unknown)")
        ))
    })?;

    extract_text_blocking(form.resume.clone(), format)
        .await
        .map_err(|e| match e {
            ExtractError::Pdf(_) => AppError::UnprocessableEntity(e.to_string()),
            ExtractError::Empty => AppError::Validation(e.to_string()),
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload
///
/// Multipart `resume` file + `jd` text → fit score and the model's full feedback.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_form(multipart).await?;
    let resume = resume_text(&form).await?;
    info!(resume_chars = resume.len(), jd_chars = form.jd.len(), "Evaluating fit");

    let result = evaluate_fit(state.llm.as_ref(), &state.prompts, &resume, &form.jd).await?;

    Ok(Json(UploadResponse {
        fit_score: result.score,
        suggestions: result.feedback,
    }))
}

/// POST /cold-email
///
/// Same input as `/upload`; returns the drafted email verbatim.
pub async fn handle_cold_email(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ColdEmailResponse>, AppError> {
    let form = read_form(multipart).await?;
    let resume = resume_text(&form).await?;
    info!(resume_chars = resume.len(), jd_chars = form.jd.len(), "Generating cold email");

    let cold_email = generate_cold_email(state.llm.as_ref(), &state.prompts, &resume, &form.jd).await?;

    Ok(Json(ColdEmailResponse { cold_email }))
}
