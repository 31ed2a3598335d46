use crate::tools::ToolError;
use crate::types::{Finding, SourceType};
use crate::utils::config::Settings;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait]
pub trait SearchTool: Send + Sync {
    /// Registry name the planner refers to.
    fn name(&self) -> &str;
    fn source_type(&self) -> SourceType;
    async fn search(&self, query: &str) -> Result<Vec<Finding>, ToolError>;
}

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn SearchTool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with all seven search backends, configured from settings.
    pub fn with_settings(settings: &Settings) -> Self {
        let tools = &settings.tools;
        let mut registry = Self::new();

        registry.register(Arc::new(crate::tools::arxiv::ArxivTool::new(
            tools.arxiv_max_results,
        )));
        registry.register(Arc::new(crate::tools::web::WebSearchTool::new(
            tools.web_max_results,
        )));
        registry.register(Arc::new(
            crate::tools::github::GithubTool::new(tools.github_max_results)
                .with_token(tools.github_token.clone()),
        ));
        registry.register(Arc::new(crate::tools::wikipedia::WikipediaTool::new(
            tools.wikipedia_max_results,
        )));
        registry.register(Arc::new(
            crate::tools::semantic_scholar::SemanticScholarTool::new(
                tools.semantic_scholar_max_results,
            )
            .with_api_key(tools.semantic_scholar_api_key.clone()),
        ));
        registry.register(Arc::new(
            crate::tools::huggingface::HuggingFaceTool::new(tools.huggingface_max_results)
                .with_token(tools.huggingface_token.clone()),
        ));
        registry.register(Arc::new(crate::tools::youtube::YoutubeTool::new(
            tools.youtube_max_results,
        )));

        registry
    }

    /// Register a tool under its own name, replacing any previous one.
    pub fn register(&mut self, tool: Arc<dyn SearchTool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn SearchTool>, ToolError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::UnknownTool {
                name: name.to_string(),
                available: self.tool_names().join(", "),
            })
    }

    /// Get a sorted list of all registered tool names
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    #[async_trait]
    impl SearchTool for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn source_type(&self) -> SourceType {
            SourceType::WebPage
        }

        async fn search(&self, _query: &str) -> Result<Vec<Finding>, ToolError> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.tool_names().len(), 0);
    }

    #[test]
    fn test_registry_with_settings() {
        let settings = Settings::from_lookup(|key| {
            (key == "GROQ_API_KEY").then(|| "test".to_string())
        })
        .unwrap();
        let registry = ToolRegistry::with_settings(&settings);

        assert_eq!(
            registry.tool_names(),
            vec![
                "arxiv",
                "github",
                "huggingface",
                "semantic_scholar",
                "web",
                "wikipedia",
                "youtube"
            ]
        );
        assert_eq!(
            registry.get("github").unwrap().source_type(),
            SourceType::CodeRepo
        );
    }

    #[test]
    fn test_unknown_tool_lists_available() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Named("web")));
        registry.register(Arc::new(Named("arxiv")));

        let err = registry.get("bing").err().unwrap();
        assert!(matches!(err, ToolError::UnknownTool { .. }));
        assert_eq!(err.to_string(), "Unknown tool 'bing'. Available: arxiv, web");
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Named("web")));
        registry.register(Arc::new(Named("web")));
        assert_eq!(registry.tool_names().len(), 1);
        assert!(registry.has_tool("web"));
    }
}
