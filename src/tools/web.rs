//! Web search tool implementation using daedra
//!
//! daedra queries DuckDuckGo, so no API key is needed.

use crate::tools::registry::SearchTool;
use crate::tools::ToolError;
use crate::types::{truncate_chars, Finding, SourceType};
use async_trait::async_trait;

/// One DuckDuckGo result, independent of daedra's response types.
#[derive(Debug, Clone)]
pub(crate) struct WebHit {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// Run a DuckDuckGo search through daedra.
pub(crate) async fn duckduckgo(query: &str, num_results: usize) -> Result<Vec<WebHit>, ToolError> {
    let search_args = daedra::SearchArgs {
        query: query.to_string(),
        options: Some(daedra::SearchOptions {
            num_results,
            ..Default::default()
        }),
    };

    let response = daedra::tools::search::perform_search(&search_args)
        .await
        .map_err(|e| ToolError::Backend(format!("DuckDuckGo search failed: {}", e)))?;

    Ok(response
        .data
        .iter()
        .map(|r| WebHit {
            title: r.title.clone(),
            url: r.url.clone(),
            description: r.description.clone(),
        })
        .collect())
}

pub struct WebSearchTool {
    max_results: usize,
}

impl WebSearchTool {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }
}

#[async_trait]
impl SearchTool for WebSearchTool {
    fn name(&self) -> &str {
        "web"
    }

    fn source_type(&self) -> SourceType {
        SourceType::WebPage
    }

    async fn search(&self, query: &str) -> Result<Vec<Finding>, ToolError> {
        let hits = duckduckgo(query, self.max_results).await?;
        Ok(hits
            .into_iter()
            .take(self.max_results)
            .map(|hit| {
                Finding::new(
                    SourceType::WebPage,
                    hit.title,
                    hit.url,
                    truncate_chars(&hit.description, 500),
                )
            })
            .collect())
    }
}
