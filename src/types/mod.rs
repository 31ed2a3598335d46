use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum characters kept in a finding's snippet.
pub const SNIPPET_MAX_CHARS: usize = 2000;

// ============= Finding Types =============

/// Kind of source a finding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceType {
    AcademicPaper,
    WebPage,
    CodeRepo,
    Encyclopedia,
    ScholarlyIndex,
    ModelHub,
    Video,
}

impl SourceType {
    /// Get the wire name of this source type.
    pub fn name(&self) -> &'static str {
        match self {
            SourceType::AcademicPaper => "academic-paper",
            SourceType::WebPage => "web-page",
            SourceType::CodeRepo => "code-repo",
            SourceType::Encyclopedia => "encyclopedia",
            SourceType::ScholarlyIndex => "scholarly-index",
            SourceType::ModelHub => "model-hub",
            SourceType::Video => "video",
        }
    }

    /// Whether findings of this kind get their snippet replaced with full
    /// page text. Repository metadata is already complete.
    pub fn is_enrichable(&self) -> bool {
        !matches!(self, SourceType::CodeRepo)
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single citation record produced by a search tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub source_type: SourceType,
    pub title: String,
    /// Not guaranteed to be a valid URL.
    pub url: String,
    /// Truncated excerpt, at most [`SNIPPET_MAX_CHARS`] characters.
    pub snippet: String,
}

impl Finding {
    pub fn new(
        source_type: SourceType,
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl AsRef<str>,
    ) -> Self {
        Self {
            source_type,
            title: title.into(),
            url: url.into(),
            snippet: truncate_chars(snippet.as_ref(), SNIPPET_MAX_CHARS).to_string(),
        }
    }

    /// Replace the snippet with extracted page text (enrichment).
    pub fn enriched(self, page_text: &str) -> Self {
        Self {
            snippet: truncate_chars(page_text, SNIPPET_MAX_CHARS).to_string(),
            ..self
        }
    }
}

// ============= Sub-task Types =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Done,
    Failed,
}

impl TaskStatus {
    /// Status only ever moves forward, once, out of `Pending`.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Pending, TaskStatus::Done) | (TaskStatus::Pending, TaskStatus::Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }
}

/// One planner-assigned unit of work binding a query to a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    /// Position in the plan, 0-based.
    pub id: usize,
    pub query: String,
    /// Name in the tool registry.
    pub tool: String,
    pub status: TaskStatus,
    pub findings: Vec<Finding>,
}

impl SubTask {
    pub fn pending(id: usize, query: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            id,
            query: query.into(),
            tool: tool.into(),
            status: TaskStatus::Pending,
            findings: Vec::new(),
        }
    }
}

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub final_report: String,
    pub errors: Vec<String>,
    pub findings: Vec<Finding>,
    pub sub_tasks: Vec<SubTask>,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemorySearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemorySearchResponse {
    pub hits: Vec<seeker_memory::MemoryHit>,
    pub total_entries: usize,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Planning error: {0}")]
    Planning(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Tool error: {0}")]
    Tool(#[from] crate::tools::ToolError),

    #[error("Memory error: {0}")]
    Memory(#[from] seeker_memory::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::LLM(_) | AppError::Planning(_) | AppError::Synthesis(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Tool(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) | AppError::Memory(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// ============= Text Helpers =============

/// Longest prefix of `s` with at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
