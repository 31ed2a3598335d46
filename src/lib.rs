//! # Seeker - Multi-Step Research Assistant
//!
//! Seeker answers a research question by planning focused sub-queries,
//! running each against one of seven search backends (arXiv, the web,
//! GitHub, Wikipedia, Semantic Scholar, the Hugging Face Hub and YouTube),
//! and asking a language model to write a report that cites what was found.
//! Finished sessions are embedded and kept in a local memory file, and
//! related past sessions are handed to the planner on later runs.
//!
//! ## Overview
//!
//! Seeker can be used in two ways:
//!
//! 1. **As a CLI / server** - Run the `seeker` binary (`research`, `memory`, `serve`)
//! 2. **As a library** - Embed the pipeline in your own Rust project
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use seeker::{memory, ResearchOrchestrator, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let store = memory::open_store(&settings).await?;
//!     let orchestrator = ResearchOrchestrator::from_settings(&settings, store)?;
//!
//!     let outcome = orchestrator.run("What is LoRA?").await?;
//!     println!("{}", outcome.final_report);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-embeddings` | Local fastembed models for the memory store (default) |
//!
//! ## Modules
//!
//! - [`research`] - State machine, planner, synthesizer and orchestrator
//! - [`tools`] - Search adapters and page reader
//! - [`llm`] - Model client and provider fallback
//! - [`memory`] - Embedding backends and past-context digest
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line parsing and output
//! - [`types`] - Data model and error handling
//! - [`utils`] - Settings

#![cfg_attr(docsrs, feature(doc_cfg))]

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Embedding backends and memory helpers.
pub mod memory;
/// The research pipeline.
pub mod research;
/// Search tool adapters.
pub mod tools;
/// Core types (findings, sub-tasks, requests, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{LLMClient, Provider};
pub use research::{ResearchOrchestrator, ResearchOutcome, Session, Step};
pub use seeker_memory::MemoryStore;
pub use tools::registry::{SearchTool, ToolRegistry};
pub use types::{AppError, Finding, Result, SourceType, SubTask, TaskStatus};
pub use utils::config::Settings;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Research pipeline
    pub orchestrator: Arc<ResearchOrchestrator>,
    /// Memory store, shared with the orchestrator
    pub memory: Arc<MemoryStore>,
}

impl AppState {
    pub fn new(orchestrator: Arc<ResearchOrchestrator>) -> Self {
        let memory = Arc::clone(orchestrator.memory());
        Self {
            orchestrator,
            memory,
        }
    }
}
