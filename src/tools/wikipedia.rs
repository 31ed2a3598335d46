//! Wikipedia search with intro extracts, in a single MediaWiki API call.

use crate::tools::registry::SearchTool;
use crate::tools::{check_status, http_client, ToolError};
use crate::types::{truncate_chars, Finding, SourceType};
use async_trait::async_trait;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/w";

pub struct WikipediaTool {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    /// Search rank; the generator returns pages unordered.
    #[serde(default)]
    index: u32,
    #[serde(default)]
    extract: String,
    fullurl: Option<String>,
    #[serde(default)]
    missing: bool,
}

impl WikipediaTool {
    pub fn new(max_results: usize) -> Self {
        Self {
            client: http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SearchTool for WikipediaTool {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Encyclopedia
    }

    async fn search(&self, query: &str) -> Result<Vec<Finding>, ToolError> {
        let limit = self.max_results.to_string();
        let response = self
            .client
            .get(format!("{}/api.php", self.base_url.trim_end_matches('/')))
            .query(&[
                ("action", "query"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", limit.as_str()),
                ("prop", "extracts|info"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("inprop", "url"),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .send()
            .await?;
        let body: QueryResponse = check_status(response).await?.json().await?;

        // No `query` key at all means the search matched nothing.
        let mut pages: Vec<Page> = body
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_iter()
            .filter(|page| !page.missing)
            .collect();
        pages.sort_by_key(|page| page.index);

        Ok(pages
            .into_iter()
            .take(self.max_results)
            .map(|page| {
                let url = page.fullurl.unwrap_or_else(|| {
                    format!(
                        "https://en.wikipedia.org/wiki/{}",
                        page.title.replace(' ', "_")
                    )
                });
                Finding::new(
                    SourceType::Encyclopedia,
                    page.title,
                    url,
                    truncate_chars(page.extract.trim(), 500),
                )
            })
            .collect())
    }
}
