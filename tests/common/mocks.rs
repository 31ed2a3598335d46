//! Mock implementations for testing.
//!
//! Stand-ins for the model client, search tools, page reader and embedder so
//! the research pipeline can run end to end without network access.

use async_trait::async_trait;
use parking_lot::Mutex;
use seeker::llm::LLMClient;
use seeker::tools::{PageReader, SearchTool, ToolError};
use seeker::types::{AppError, Finding, Result, SourceType};
use seeker_memory::Embedder;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock LLM client that answers planner calls with `plan` and synthesizer
/// calls with `report`.
///
/// The two roles are told apart by the system prompt. Every
/// `(system, prompt)` pair is recorded.
pub struct ScriptedLLM {
    plan: String,
    report: String,
    fail_plan: bool,
    fail_report: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedLLM {
    pub fn new(plan: &str, report: &str) -> Self {
        Self {
            plan: plan.to_string(),
            report: report.to_string(),
            fail_plan: false,
            fail_report: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_plan() -> Self {
        Self {
            fail_plan: true,
            ..Self::new("", "")
        }
    }

    pub fn failing_report(plan: &str) -> Self {
        Self {
            fail_report: true,
            ..Self::new(plan, "")
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    /// User prompts sent with the planner system prompt.
    pub fn planner_prompts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(system, _)| is_planner(system))
            .map(|(_, prompt)| prompt)
            .collect()
    }

    /// User prompts sent with the synthesizer system prompt.
    pub fn synthesizer_prompts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(system, _)| !is_planner(system))
            .map(|(_, prompt)| prompt)
            .collect()
    }
}

fn is_planner(system: &str) -> bool {
    system.contains("research planning assistant")
}

#[async_trait]
impl LLMClient for ScriptedLLM {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.calls
            .lock()
            .push((system.to_string(), prompt.to_string()));

        if is_planner(system) {
            if self.fail_plan {
                return Err(AppError::LLM("planner model unavailable".to_string()));
            }
            Ok(self.plan.clone())
        } else {
            if self.fail_report {
                return Err(AppError::LLM("rate limited".to_string()));
            }
            Ok(self.report.clone())
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Tool returning a fixed list of findings.
pub struct StubTool {
    name: String,
    source_type: SourceType,
    findings: Vec<Finding>,
    queries: Mutex<Vec<String>>,
}

impl StubTool {
    pub fn new(name: &str, source_type: SourceType, findings: Vec<Finding>) -> Self {
        Self {
            name: name.to_string(),
            source_type,
            findings,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A tool returning `count` findings titled "{name} result {i}".
    pub fn with_count(name: &str, source_type: SourceType, count: usize) -> Self {
        let findings = (0..count)
            .map(|i| {
                Finding::new(
                    source_type,
                    format!("{} result {}", name, i),
                    format!("https://{}.example/{}", name, i),
                    format!("{} snippet {}", name, i),
                )
            })
            .collect();
        Self::new(name, source_type, findings)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SearchTool for StubTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_type(&self) -> SourceType {
        self.source_type
    }

    async fn search(&self, query: &str) -> std::result::Result<Vec<Finding>, ToolError> {
        self.queries.lock().push(query.to_string());
        Ok(self.findings.clone())
    }
}

/// Tool whose every search fails with a backend error.
pub struct FailingTool {
    name: String,
    source_type: SourceType,
}

impl FailingTool {
    pub fn new(name: &str, source_type: SourceType) -> Self {
        Self {
            name: name.to_string(),
            source_type,
        }
    }
}

#[async_trait]
impl SearchTool for FailingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_type(&self) -> SourceType {
        self.source_type
    }

    async fn search(&self, _query: &str) -> std::result::Result<Vec<Finding>, ToolError> {
        Err(ToolError::Backend("connection reset".to_string()))
    }
}

/// Page reader returning the same text for every URL, recording each URL.
pub struct StubReader {
    text: Option<String>,
    fail: bool,
    urls: Mutex<Vec<String>>,
}

impl StubReader {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            fail: false,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self {
            text: None,
            fail: false,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            fail: true,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl PageReader for StubReader {
    async fn read(&self, url: &str) -> std::result::Result<Option<String>, ToolError> {
        self.urls.lock().push(url.to_string());
        if self.fail {
            return Err(ToolError::Http("timed out".to_string()));
        }
        Ok(self.text.clone())
    }
}

const KEYWORDS: [&str; 6] = ["lora", "adapter", "rank", "diffusion", "protein", "quantum"];

/// Bag-of-keywords embedder: one dimension per keyword plus a small bias
/// dimension, so texts sharing keywords are similar and unrelated texts are
/// not.
#[derive(Default)]
pub struct KeywordEmbedder {
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> seeker_memory::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let lower = text.to_lowercase();
        let mut vector: Vec<f32> = KEYWORDS
            .iter()
            .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
            .collect();
        vector.push(0.1);
        Ok(vector)
    }

    fn model_name(&self) -> &str {
        "keywords"
    }
}

/// Embedder that always fails.
pub struct BrokenEmbedder;

#[async_trait]
impl Embedder for BrokenEmbedder {
    async fn embed(&self, _text: &str) -> seeker_memory::Result<Vec<f32>> {
        Err(seeker_memory::Error::Embedding("model unavailable".to_string()))
    }

    fn model_name(&self) -> &str {
        "broken"
    }
}
