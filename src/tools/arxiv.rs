//! arXiv search through the public Atom API.

use crate::tools::registry::SearchTool;
use crate::tools::{check_status, http_client, ToolError};
use crate::types::{truncate_chars, Finding, SourceType};
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;

pub const DEFAULT_BASE_URL: &str = "https://export.arxiv.org";

pub struct ArxivTool {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
}

impl ArxivTool {
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
impl SearchTool for ArxivTool {
    fn name(&self) -> &str {
        "arxiv"
    }

    fn source_type(&self) -> SourceType {
        SourceType::AcademicPaper
    }

    async fn search(&self, query: &str) -> Result<Vec<Finding>, ToolError> {
        let search_query = format!("all:{}", query);
        let max_results = self.max_results.to_string();
        let response = self
            .client
            .get(format!("{}/api/query", self.base_url.trim_end_matches('/')))
            .query(&[
                ("search_query", search_query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "relevance"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;

        let findings = parse_feed(&body)?
            .into_iter()
            .take(self.max_results)
            .map(|entry| {
                Finding::new(
                    SourceType::AcademicPaper,
                    entry.title,
                    entry.id,
                    truncate_chars(&entry.summary, 500),
                )
            })
            .collect();
        Ok(findings)
    }
}

#[derive(Debug, Default, PartialEq)]
struct AtomEntry {
    id: String,
    title: String,
    summary: String,
}

/// Extract `<entry>` id, title and summary from an Atom feed.
fn parse_feed(xml: &str) -> Result<Vec<AtomEntry>, ToolError> {
    let mut reader = Reader::from_str(xml);
    let mut entries = Vec::new();
    let mut current: Option<AtomEntry> = None;
    let mut field: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local_name = e.local_name();
                let name = std::str::from_utf8(local_name.as_ref()).unwrap_or("");
                match name {
                    "entry" => current = Some(AtomEntry::default()),
                    "id" | "title" | "summary" if current.is_some() => {
                        field = Some(name.to_string())
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let local_name = e.local_name();
                let name = std::str::from_utf8(local_name.as_ref()).unwrap_or("");
                if name == "entry" {
                    if let Some(entry) = current.take() {
                        entries.push(AtomEntry {
                            id: entry.id.trim().to_string(),
                            title: collapse_whitespace(&entry.title),
                            summary: collapse_whitespace(&entry.summary),
                        });
                    }
                } else if field.as_deref() == Some(name) {
                    field = None;
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field.as_deref()) {
                    let text = e
                        .unescape()
                        .map_err(|err| ToolError::Parse(err.to_string()))?;
                    match field {
                        "id" => entry.id.push_str(&text),
                        "title" => entry.title.push_str(&text),
                        _ => entry.summary.push_str(&text),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ToolError::Parse(format!("Atom feed: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
