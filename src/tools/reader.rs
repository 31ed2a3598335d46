//! Full-page text extraction for snippet enrichment.

use crate::tools::{check_status, ToolError};
use crate::types::{truncate_chars, SNIPPET_MAX_CHARS};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Fetches a page and returns its readable text.
#[async_trait]
pub trait PageReader: Send + Sync {
    /// `Ok(None)` when the page has no extractable text.
    async fn read(&self, url: &str) -> Result<Option<String>, ToolError>;
}

pub struct HttpPageReader {
    client: reqwest::Client,
}

impl Default for HttpPageReader {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpPageReader {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(Duration::from_secs(5))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait]
impl PageReader for HttpPageReader {
    async fn read(&self, url: &str) -> Result<Option<String>, ToolError> {
        let response = check_status(self.client.get(url).send().await?).await?;
        let html = response.text().await?;
        Ok(extract_main_text(&html))
    }
}

/// Paragraph text from `<article>`/`<main>`, or from the whole body when
/// neither yields anything. Capped at the snippet limit.
pub fn extract_main_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let text = ["article p, main p", "body p"]
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .map(|selector| {
            document
                .select(&selector)
                .map(|p| p.text().collect::<Vec<_>>().join(" "))
                .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .find(|text| !text.is_empty())?;

    Some(truncate_chars(&text, SNIPPET_MAX_CHARS).to_string())
}
