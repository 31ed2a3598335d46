//! Semantic Scholar paper search via the Graph API.

use crate::tools::registry::SearchTool;
use crate::tools::{check_status, http_client, ToolError};
use crate::types::{truncate_chars, Finding, SourceType};
use async_trait::async_trait;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.semanticscholar.org";

const FIELDS: &str = "title,url,abstract,year,citationCount";

pub struct SemanticScholarTool {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BulkSearchResponse {
    #[serde(default)]
    data: Vec<Paper>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paper {
    paper_id: Option<String>,
    title: Option<String>,
    url: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    year: Option<i32>,
    citation_count: Option<u64>,
}

impl Paper {
    fn snippet(&self) -> String {
        let year = self
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        format!(
            "{} [Year: {}, Citations: {}]",
            truncate_chars(self.abstract_text.as_deref().unwrap_or(""), 400),
            year,
            self.citation_count.unwrap_or(0)
        )
    }

    fn link(&self) -> String {
        match (&self.url, &self.paper_id) {
            (Some(url), _) if !url.is_empty() => url.clone(),
            (_, Some(id)) => format!("https://www.semanticscholar.org/paper/{}", id),
            _ => String::new(),
        }
    }
}

impl SemanticScholarTool {
    pub fn new(max_results: usize) -> Self {
        Self {
            client: http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results,
            api_key: None,
        }
    }

    /// Keyless access shares a global rate limit.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SearchTool for SemanticScholarTool {
    fn name(&self) -> &str {
        "semantic_scholar"
    }

    fn source_type(&self) -> SourceType {
        SourceType::ScholarlyIndex
    }

    async fn search(&self, query: &str) -> Result<Vec<Finding>, ToolError> {
        let mut request = self
            .client
            .get(format!(
                "{}/graph/v1/paper/search/bulk",
                self.base_url.trim_end_matches('/')
            ))
            .query(&[("query", query), ("fields", FIELDS)]);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let body: BulkSearchResponse = check_status(request.send().await?).await?.json().await?;

        Ok(body
            .data
            .into_iter()
            .filter(|paper| paper.title.is_some())
            .take(self.max_results)
            .map(|paper| {
                let snippet = paper.snippet();
                let url = paper.link();
                Finding::new(
                    SourceType::ScholarlyIndex,
                    paper.title.unwrap_or_default(),
                    url,
                    snippet,
                )
            })
            .collect())
    }
}
