//! LLM Client abstractions and provider management
//!
//! This module provides a unified interface for the model calls the research
//! pipeline makes (planning and synthesis):
//! - **OpenAI-compatible**: Groq (default), OpenAI, Ollama's `/v1` endpoint
//! - **Gemini**: Google's OpenAI-compatible endpoint, used as a fallback
//!
//! Timeouts and retries live in the client; the pipeline imposes none of its own.

use crate::types::{AppError, Result};
use crate::utils::config::Settings;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Generic LLM client trait for provider abstraction
///
/// All LLM providers implement this trait, allowing for easy swapping
/// between providers without changing application code.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Request tuning shared by every provider
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Sampling temperature
    pub temperature: f32,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first attempt on transient failures
    pub max_retries: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }
}

/// Base URL of Gemini's OpenAI-compatible API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// Any OpenAI-compatible chat completions API
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenAI {
    ///     api_key: "gsk_...".to_string(),
    ///     api_base: "https://api.groq.com/openai/v1".to_string(),
    ///     model: "llama-3.3-70b-versatile".to_string(),
    /// };
    /// ```
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
    },

    /// Google Gemini through its OpenAI-compatible endpoint
    Gemini {
        api_key: String,
        api_base: String,
        model: String,
    },
}

impl Provider {
    /// Create a client instance for this provider
    pub fn create_client(&self, options: &ClientOptions) -> Result<Box<dyn LLMClient>> {
        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
            }
            | Provider::Gemini {
                api_key,
                api_base,
                model,
            } => Ok(Box::new(super::openai::OpenAICompatClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                options,
            )?)),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI-compatible",
            Provider::Gemini { .. } => "Gemini",
        }
    }
}

/// Primary client with an optional fallback.
///
/// A failed primary call is logged and retried once on the fallback. When
/// both fail, the fallback's error is returned.
pub struct FallbackClient {
    primary: Box<dyn LLMClient>,
    fallback: Option<Box<dyn LLMClient>>,
}

impl FallbackClient {
    pub fn new(primary: Box<dyn LLMClient>, fallback: Option<Box<dyn LLMClient>>) -> Self {
        Self { primary, fallback }
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

#[async_trait]
impl LLMClient for FallbackClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self.primary.generate(prompt).await {
            Ok(text) => Ok(text),
            Err(e) => match &self.fallback {
                Some(fallback) => {
                    tracing::warn!(
                        primary = self.primary.model_name(),
                        fallback = fallback.model_name(),
                        error = %e,
                        "Primary model failed, trying fallback"
                    );
                    fallback.generate(prompt).await
                }
                None => Err(e),
            },
        }
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        match self.primary.generate_with_system(system, prompt).await {
            Ok(text) => Ok(text),
            Err(e) => match &self.fallback {
                Some(fallback) => {
                    tracing::warn!(
                        primary = self.primary.model_name(),
                        fallback = fallback.model_name(),
                        error = %e,
                        "Primary model failed, trying fallback"
                    );
                    fallback.generate_with_system(system, prompt).await
                }
                None => Err(e),
            },
        }
    }

    fn model_name(&self) -> &str {
        self.primary.model_name()
    }
}

/// Build the model client described by `settings`: the primary provider,
/// wrapped with the Gemini fallback when a Gemini key is configured.
pub fn build_llm_client(settings: &Settings) -> Result<Arc<dyn LLMClient>> {
    let options = ClientOptions {
        temperature: settings.llm.temperature,
        timeout: Duration::from_secs(settings.llm.timeout_secs),
        max_retries: settings.llm.max_retries,
    };

    let primary = Provider::OpenAI {
        api_key: settings.llm.api_key.clone(),
        api_base: settings.llm.api_base.clone(),
        model: settings.llm.model.clone(),
    }
    .create_client(&options)?;

    let fallback = match &settings.llm.gemini_api_key {
        Some(key) => Some(
            Provider::Gemini {
                api_key: key.clone(),
                api_base: settings.llm.gemini_api_base.clone(),
                model: settings.llm.gemini_model.clone(),
            }
            .create_client(&options)?,
        ),
        None => None,
    };

    if fallback.is_none() {
        return Ok(Arc::from(primary));
    }
    Ok(Arc::new(FallbackClient::new(primary, fallback)))
}
