//! LLM Provider Clients and Abstractions
//!
//! The research pipeline treats the language model as an opaque
//! `generate(prompt) -> text` function that may fail with an
//! [`AppError::LLM`](crate::types::AppError::LLM) on timeout, quota
//! exhaustion or malformed output. This module supplies that function.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all providers implement
//! - [`OpenAICompatClient`] - HTTP client for OpenAI-compatible APIs, with
//!   its own timeout and bounded retry
//! - [`FallbackClient`] - Primary model with an optional fallback
//! - [`build_llm_client`] - Wires the above from [`Settings`](crate::utils::config::Settings)
//!
//! # Example
//!
//! ```ignore
//! use seeker::llm::build_llm_client;
//!
//! let client = build_llm_client(&settings)?;
//! let response = client.generate("What is 2+2?").await?;
//! ```

/// Core LLM client trait, providers and the fallback chain.
pub mod client;
/// OpenAI-compatible HTTP client.
pub mod openai;

pub use client::{build_llm_client, ClientOptions, FallbackClient, LLMClient, Provider};
pub use openai::OpenAICompatClient;
