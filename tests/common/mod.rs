//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod mocks;

use mocks::KeywordEmbedder;
use seeker::llm::LLMClient;
use seeker::tools::{PageReader, SearchTool, ToolRegistry};
use seeker::ResearchOrchestrator;
use seeker_memory::{Embedder, MemoryStore};
use std::path::Path;
use std::sync::Arc;

/// A memory store at `dir/memory.json` using the keyword embedder.
pub async fn keyword_store(dir: &Path) -> Arc<MemoryStore> {
    store_with(dir, Arc::new(KeywordEmbedder::default())).await
}

pub async fn store_with(dir: &Path, embedder: Arc<dyn Embedder>) -> Arc<MemoryStore> {
    Arc::new(
        MemoryStore::open(dir.join("memory.json"), embedder)
            .await
            .expect("open memory store"),
    )
}

pub fn registry_of(tools: Vec<Arc<dyn SearchTool>>) -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register(tool);
    }
    Arc::new(registry)
}

pub fn orchestrator(
    llm: Arc<dyn LLMClient>,
    tools: Vec<Arc<dyn SearchTool>>,
    reader: Arc<dyn PageReader>,
    memory: Arc<MemoryStore>,
) -> ResearchOrchestrator {
    ResearchOrchestrator::new(llm, registry_of(tools), reader, memory)
}

/// Planner JSON for `(query, tool)` pairs.
pub fn plan_json(tasks: &[(&str, &str)]) -> String {
    let sub_tasks: Vec<serde_json::Value> = tasks
        .iter()
        .map(|(query, tool)| serde_json::json!({"query": query, "tool": tool}))
        .collect();
    serde_json::json!({
        "reasoning": "split by source",
        "sub_tasks": sub_tasks,
    })
    .to_string()
}
