use crate::llm::client::GEMINI_API_BASE;
use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_LLM_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
pub const DEFAULT_MAX_SUB_TASKS: usize = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub embedding: EmbeddingSettings,
    pub research: ResearchSettings,
    pub tools: ToolSettings,
    pub memory: MemorySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub gemini_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    pub model: String,
    /// OpenAI-compatible `/embeddings` endpoint; local model when unset.
    pub api_base: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchSettings {
    pub max_sub_tasks: usize,
}

/// Per-tool result limits and credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolSettings {
    pub arxiv_max_results: usize,
    pub web_max_results: usize,
    pub github_max_results: usize,
    pub wikipedia_max_results: usize,
    pub semantic_scholar_max_results: usize,
    pub huggingface_max_results: usize,
    pub youtube_max_results: usize,
    pub github_token: Option<String>,
    pub semantic_scholar_api_key: Option<String>,
    pub huggingface_token: Option<String>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            arxiv_max_results: 5,
            web_max_results: 5,
            github_max_results: 5,
            wikipedia_max_results: 3,
            semantic_scholar_max_results: 5,
            huggingface_max_results: 5,
            youtube_max_results: 3,
            github_token: None,
            semantic_scholar_api_key: None,
            huggingface_token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemorySettings {
    pub path: PathBuf,
}

/// `~/.agentic-research-assistant/memory.json`, relative to the working
/// directory when no home directory is known.
pub fn default_memory_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".agentic-research-assistant")
        .join("memory.json")
}

impl Settings {
    /// Load `.env` (if any) and read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let tool_defaults = ToolSettings::default();

        let api_key = get("GROQ_API_KEY").ok_or_else(|| {
            AppError::Configuration("GROQ_API_KEY environment variable is not set".to_string())
        })?;

        let max_sub_tasks = parse(&get, "MAX_SUB_TASKS", DEFAULT_MAX_SUB_TASKS)?;
        if max_sub_tasks == 0 {
            return Err(AppError::Configuration(
                "Invalid value for MAX_SUB_TASKS: must be at least 1".to_string(),
            ));
        }

        Ok(Settings {
            server: ServerSettings {
                host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: parse(&get, "PORT", 3000)?,
            },
            llm: LlmSettings {
                api_key,
                api_base: get("LLM_API_BASE").unwrap_or_else(|| DEFAULT_LLM_API_BASE.to_string()),
                model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                temperature: parse(&get, "LLM_TEMPERATURE", 0.2)?,
                timeout_secs: parse(&get, "LLM_TIMEOUT_SECS", 30)?,
                max_retries: parse(&get, "LLM_MAX_RETRIES", 2)?,
                gemini_api_key: get("GEMINI_API_KEY"),
                gemini_api_base: get("GEMINI_API_BASE")
                    .unwrap_or_else(|| GEMINI_API_BASE.to_string()),
                gemini_model: get("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            },
            embedding: EmbeddingSettings {
                model: get("EMBEDDING_MODEL")
                    .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
                api_base: get("EMBEDDING_API_BASE"),
                api_key: get("EMBEDDING_API_KEY"),
            },
            research: ResearchSettings {
                max_sub_tasks,
            },
            tools: ToolSettings {
                arxiv_max_results: parse(&get, "ARXIV_MAX_RESULTS", tool_defaults.arxiv_max_results)?,
                web_max_results: parse(&get, "WEB_MAX_RESULTS", tool_defaults.web_max_results)?,
                github_max_results: parse(
                    &get,
                    "GITHUB_MAX_RESULTS",
                    tool_defaults.github_max_results,
                )?,
                wikipedia_max_results: parse(
                    &get,
                    "WIKIPEDIA_MAX_RESULTS",
                    tool_defaults.wikipedia_max_results,
                )?,
                semantic_scholar_max_results: parse(
                    &get,
                    "SEMANTIC_SCHOLAR_MAX_RESULTS",
                    tool_defaults.semantic_scholar_max_results,
                )?,
                huggingface_max_results: parse(
                    &get,
                    "HUGGINGFACE_MAX_RESULTS",
                    tool_defaults.huggingface_max_results,
                )?,
                youtube_max_results: parse(
                    &get,
                    "YOUTUBE_MAX_RESULTS",
                    tool_defaults.youtube_max_results,
                )?,
                github_token: get("GITHUB_TOKEN"),
                semantic_scholar_api_key: get("SEMANTIC_SCHOLAR_API_KEY"),
                huggingface_token: get("HUGGINGFACE_TOKEN"),
            },
            memory: MemorySettings {
                path: get("SEEKER_MEMORY_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_memory_path),
            },
        })
    }
}

fn parse<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            AppError::Configuration(format!("Invalid value for {}: {:?} ({})", key, raw, e))
        }),
        None => Ok(default),
    }
}
