use tracing::info;

use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::matching::prompts::PromptTemplates;

/// Drafts outreach text. The model reply is returned as-is.
pub async fn generate_cold_email(
    llm: &dyn ChatModel,
    prompts: &PromptTemplates,
    resume_text: &str,
    jd_text: &str,
) -> Result<String, AppError> {
    let prompt = prompts.cold_email_prompt(resume_text, jd_text);
    let email = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Cold email generation failed: {e}")))?;

    info!(chars = email.len(), "Cold email generated");
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::LlmError;

    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("Subject: Rust role\n\nHi there,".to_string())
        }
    }

    #[tokio::test]
    async fn test_returns_raw_reply_and_sends_filled_prompt() {
        let model = RecordingModel::default();
        let email = generate_cold_email(
            &model,
            &PromptTemplates::default(),
            "Built a tokio proxy",
            "Infra engineer, Rust",
        )
        .await
        .unwrap();

        assert_eq!(email, "Subject: Rust role\n\nHi there,");
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Built a tokio proxy"));
        assert!(prompts[0].contains("Infra engineer, Rust"));
    }
}
