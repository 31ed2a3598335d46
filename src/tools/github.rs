//! GitHub repository search, most-starred first.

use crate::tools::registry::SearchTool;
use crate::tools::{check_status, http_client, ToolError};
use crate::types::{truncate_chars, Finding, SourceType};
use async_trait::async_trait;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

pub struct GithubTool {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
    html_url: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
}

impl Repository {
    fn snippet(&self) -> String {
        format!(
            "{} [{}, {} stars]",
            self.description.as_deref().unwrap_or(""),
            self.language.as_deref().unwrap_or("N/A"),
            self.stargazers_count
        )
    }
}

impl GithubTool {
    pub fn new(max_results: usize) -> Self {
        Self {
            client: http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results,
            token: None,
        }
    }

    /// Authenticated requests get a much higher rate limit.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SearchTool for GithubTool {
    fn name(&self) -> &str {
        "github"
    }

    fn source_type(&self) -> SourceType {
        SourceType::CodeRepo
    }

    async fn search(&self, query: &str) -> Result<Vec<Finding>, ToolError> {
        let per_page = self.max_results.to_string();
        let mut request = self
            .client
            .get(format!(
                "{}/search/repositories",
                self.base_url.trim_end_matches('/')
            ))
            .header("Accept", "application/vnd.github+json")
            .query(&[
                ("q", query),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let body: SearchResponse = check_status(request.send().await?).await?.json().await?;

        Ok(body
            .items
            .into_iter()
            .take(self.max_results)
            .map(|repo| {
                let snippet = repo.snippet();
                Finding::new(
                    SourceType::CodeRepo,
                    repo.full_name,
                    repo.html_url,
                    truncate_chars(&snippet, 500),
                )
            })
            .collect())
    }
}
