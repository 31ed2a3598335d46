use crate::llm::client::{ClientOptions, LLMClient};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Client for any API that speaks the OpenAI chat completions protocol
/// (Groq, OpenAI, Gemini's compatibility layer, Ollama `/v1`).
pub struct OpenAICompatClient {
    http_client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f32,
    max_retries: u32,
    retry_backoff: Duration,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Outcome of a single HTTP attempt.
enum AttemptError {
    /// Transport failure, 429 or 5xx; worth another try.
    Retryable(String),
    Fatal(String),
}

impl OpenAICompatClient {
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        options: &ClientOptions,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            temperature: options.temperature,
            max_retries: options.max_retries,
            retry_backoff: Duration::from_millis(500),
        })
    }

    /// Override the base delay between retries (doubles per attempt).
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    async fn chat(&self, messages: Vec<Value>) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
        });

        let mut attempt = 0u32;
        loop {
            match self.send_once(&url, &body).await {
                Ok(content) => return Ok(content),
                Err(AttemptError::Retryable(msg)) if attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.retry_backoff * 2u32.pow(attempt - 1);
                    tracing::warn!(
                        model = %self.model,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %msg,
                        "Model request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(AttemptError::Retryable(msg)) | Err(AttemptError::Fatal(msg)) => {
                    return Err(AppError::LLM(msg));
                }
            }
        }
    }

    async fn send_once(&self, url: &str, body: &Value) -> std::result::Result<String, AttemptError> {
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let msg = format!("Model request failed ({}): {}", status, text);
            return Err(if status.as_u16() == 429 || status.is_server_error() {
                AttemptError::Retryable(msg)
            } else {
                AttemptError::Fatal(msg)
            });
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| AttemptError::Fatal(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AttemptError::Fatal("No response from model".to_string()))
    }
}

#[async_trait]
impl LLMClient for OpenAICompatClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat(vec![json!({"role": "user", "content": prompt})])
            .await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.chat(vec![
            json!({"role": "system", "content": system}),
            json!({"role": "user", "content": prompt}),
        ])
        .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
