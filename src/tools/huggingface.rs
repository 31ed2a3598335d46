//! Hugging Face Hub model search, most-downloaded first.

use crate::tools::registry::SearchTool;
use crate::tools::{check_status, http_client, ToolError};
use crate::types::{Finding, SourceType};
use async_trait::async_trait;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://huggingface.co";

pub struct HuggingFaceTool {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Model {
    id: String,
    pipeline_tag: Option<String>,
    #[serde(default)]
    downloads: u64,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    tags: Vec<String>,
}

impl Model {
    fn snippet(&self) -> String {
        format!(
            "{} model, {} downloads, {} likes. Tags: {}",
            self.pipeline_tag.as_deref().unwrap_or("unknown"),
            self.downloads,
            self.likes,
            self.tags
                .iter()
                .take(5)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl HuggingFaceTool {
    pub fn new(max_results: usize) -> Self {
        Self {
            client: http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results,
            token: None,
        }
    }

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
impl SearchTool for HuggingFaceTool {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn source_type(&self) -> SourceType {
        SourceType::ModelHub
    }

    async fn search(&self, query: &str) -> Result<Vec<Finding>, ToolError> {
        let base = self.base_url.trim_end_matches('/');
        let limit = self.max_results.to_string();
        let mut request = self.client.get(format!("{}/api/models", base)).query(&[
            ("search", query),
            ("sort", "downloads"),
            ("direction", "-1"),
            ("limit", limit.as_str()),
        ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let models: Vec<Model> = check_status(request.send().await?).await?.json().await?;

        Ok(models
            .into_iter()
            .take(self.max_results)
            .map(|model| {
                let snippet = model.snippet();
                Finding::new(
                    SourceType::ModelHub,
                    model.id.clone(),
                    format!("https://huggingface.co/{}", model.id),
                    snippet,
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_snippet_keeps_five_tags() {
        let model: Model = serde_json::from_value(serde_json::json!({
            "id": "meta-llama/Llama-2-7b",
            "pipeline_tag": "text-generation",
            "downloads": 1200,
            "likes": 45,
            "tags": ["a", "b", "c", "d", "e", "f", "g"]
        }))
        .unwrap();

        assert_eq!(
            model.snippet(),
            "text-generation model, 1200 downloads, 45 likes. Tags: a, b, c, d, e"
        );
    }

    #[test]
    fn test_model_with_sparse_metadata() {
        let model: Model = serde_json::from_value(serde_json::json!({
            "_id": "65a0",
            "id": "x/y",
            "modelId": "x/y"
        }))
        .unwrap();
        assert_eq!(model.id, "x/y");
        assert_eq!(model.snippet(), "unknown model, 0 downloads, 0 likes. Tags: ");
    }
}
