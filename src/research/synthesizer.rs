use crate::llm::LLMClient;
use crate::research::prompts::{synthesizer_user_prompt, SYNTHESIZER_SYSTEM_PROMPT};
use crate::types::{AppError, Finding, Result};
use std::sync::Arc;

/// Writes the final cited report from the accumulated findings.
pub struct Synthesizer {
    llm: Arc<dyn LLMClient>,
}

impl Synthesizer {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    /// Model failures and blank output both surface as [`AppError::Synthesis`].
    pub async fn synthesize(
        &self,
        query: &str,
        findings: &[Finding],
        errors: &[String],
    ) -> Result<String> {
        let report = self
            .llm
            .generate_with_system(
                SYNTHESIZER_SYSTEM_PROMPT,
                &synthesizer_user_prompt(query, findings, errors),
            )
            .await
            .map_err(|e| AppError::Synthesis(e.to_string()))?;

        let report = report.trim();
        if report.is_empty() {
            return Err(AppError::Synthesis(
                "Model returned an empty report".to_string(),
            ));
        }
        Ok(report.to_string())
    }
}
