//! YouTube videos, found by restricting a DuckDuckGo search to youtube.com.
//!
//! Each video's snippet is the head of its English transcript when the
//! timedtext endpoint has one, otherwise the search result description.

use crate::tools::registry::SearchTool;
use crate::tools::web::duckduckgo;
use crate::tools::{check_status, http_client, ToolError};
use crate::types::{truncate_chars, Finding, SourceType};
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

pub const DEFAULT_TRANSCRIPT_BASE_URL: &str = "https://www.youtube.com";

/// Characters of transcript kept as the snippet.
pub const TRANSCRIPT_SNIPPET_CHARS: usize = 1500;

/// Characters of search description kept when there is no transcript.
pub const DESCRIPTION_SNIPPET_CHARS: usize = 500;

static VIDEO_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?:v=|/v/|youtu\.be/)([a-zA-Z0-9_-]{11})").ok());

/// Pull the 11-character video id out of a YouTube URL.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID
        .as_ref()?
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub struct YoutubeTool {
    client: reqwest::Client,
    transcript_base_url: String,
    max_results: usize,
}

impl YoutubeTool {
    pub fn new(max_results: usize) -> Self {
        Self {
            client: http_client(),
            transcript_base_url: DEFAULT_TRANSCRIPT_BASE_URL.to_string(),
            max_results,
        }
    }

    pub fn with_transcript_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.transcript_base_url = base_url.into();
        self
    }

    /// English transcript of `video_id` as one line of text.
    ///
    /// `Ok(None)` when the video has no captions.
    pub async fn transcript(&self, video_id: &str) -> Result<Option<String>, ToolError> {
        let response = self
            .client
            .get(format!(
                "{}/api/timedtext",
                self.transcript_base_url.trim_end_matches('/')
            ))
            .query(&[("v", video_id), ("lang", "en")])
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;

        let text = parse_timedtext(&body)?;
        Ok((!text.is_empty()).then_some(text))
    }

    async fn snippet_for(&self, video_id: &str, description: &str) -> String {
        match self.transcript(video_id).await {
            Ok(Some(text)) => truncate_chars(&text, TRANSCRIPT_SNIPPET_CHARS).to_string(),
            Ok(None) => truncate_chars(description, DESCRIPTION_SNIPPET_CHARS).to_string(),
            Err(e) => {
                debug!(video_id, error = %e, "No transcript, using description");
                truncate_chars(description, DESCRIPTION_SNIPPET_CHARS).to_string()
            }
        }
    }
}

#[async_trait]
impl SearchTool for YoutubeTool {
    fn name(&self) -> &str {
        "youtube"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Video
    }

    async fn search(&self, query: &str) -> Result<Vec<Finding>, ToolError> {
        let hits = duckduckgo(&format!("{} site:youtube.com", query), self.max_results * 2).await?;

        let mut findings = Vec::new();
        for hit in hits {
            if findings.len() == self.max_results {
                break;
            }
            let Some(video_id) = extract_video_id(&hit.url) else {
                continue;
            };
            let snippet = self.snippet_for(video_id, &hit.description).await;
            findings.push(Finding::new(SourceType::Video, hit.title, hit.url, snippet));
        }
        Ok(findings)
    }
}

/// Join the `<text>` segments of a timedtext document into one line.
///
/// Caption text arrives escaped twice (`&amp;#39;`), so each segment is
/// unescaped again after the XML layer. An empty body yields an empty string.
fn parse_timedtext(xml: &str) -> Result<String, ToolError> {
    let mut reader = Reader::from_str(xml);
    let mut segments: Vec<String> = Vec::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"text" => {
                in_text = true;
                segments.push(String::new());
            }
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"text" => in_text = false,
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| ToolError::Parse(err.to_string()))?;
                if let Some(segment) = segments.last_mut() {
                    match quick_xml::escape::unescape(&text) {
                        Ok(inner) => segment.push_str(&inner),
                        Err(_) => segment.push_str(&text),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ToolError::Parse(format!("Transcript: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(segments
        .iter()
        .flat_map(|segment| segment.split_whitespace())
        .collect::<Vec<_>>()
        .join(" "))
}
