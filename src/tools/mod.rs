//! Search Tool Adapters
//!
//! Each adapter turns one search backend into a uniform
//! `search(query) -> Result<Vec<Finding>, ToolError>` call. An empty
//! vector means "nothing found"; an `Err` means the adapter broke, and the
//! orchestrator marks that sub-task failed.
//!
//! # Module Structure
//!
//! - [`registry`](crate::tools::registry) - The [`SearchTool`] trait and name lookup
//! - [`arxiv`](crate::tools::arxiv) - arXiv Atom API
//! - [`web`](crate::tools::web) - DuckDuckGo web search (via `daedra`)
//! - [`github`](crate::tools::github) - GitHub repository search
//! - [`wikipedia`](crate::tools::wikipedia) - MediaWiki search with intro extracts
//! - [`semantic_scholar`](crate::tools::semantic_scholar) - Semantic Scholar Graph API
//! - [`huggingface`](crate::tools::huggingface) - Hugging Face Hub model listing
//! - [`youtube`](crate::tools::youtube) - YouTube videos found through DuckDuckGo
//! - [`reader`](crate::tools::reader) - Full-page text extraction used for enrichment
//!
//! # Example
//!
//! ```ignore
//! let registry = ToolRegistry::with_settings(&settings);
//! let tool = registry.get("arxiv")?;
//! let findings = tool.search("low-rank adaptation").await?;
//! ```

/// arXiv search.
pub mod arxiv;
/// GitHub repository search.
pub mod github;
/// Hugging Face Hub model search.
pub mod huggingface;
/// Web page text extraction.
pub mod reader;
/// Tool trait and registry.
pub mod registry;
/// Semantic Scholar paper search.
pub mod semantic_scholar;
/// DuckDuckGo web search.
pub mod web;
/// Wikipedia search.
pub mod wikipedia;
/// YouTube video search.
pub mod youtube;

pub use reader::{HttpPageReader, PageReader};
pub use registry::{SearchTool, ToolRegistry};

use std::time::Duration;

/// Timeout applied to every adapter request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Failure of a single adapter call or a registry lookup.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool '{name}'. Available: {available}")]
    UnknownTool { name: String, available: String },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Search backend failed: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ToolError::Parse(err.to_string())
        } else {
            ToolError::Http(err.to_string())
        }
    }
}

/// Shared HTTP client for the JSON adapters.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("seeker/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

/// Turn a non-2xx response into [`ToolError::Status`].
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ToolError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ToolError::Status {
        status: status.as_u16(),
        body: crate::types::truncate_chars(&body, 200).to_string(),
    })
}
