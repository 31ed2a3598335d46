//! Research memory: embedding backends for the [`seeker_memory`] store and
//! the digest of past sessions handed to the planner.
//!
//! The store itself lives in the `seeker-memory` crate. This module decides
//! which [`Embedder`](seeker_memory::Embedder) it gets and how its hits are
//! rendered into prompt text.

/// Local and HTTP embedding backends.
pub mod embeddings;

pub use embeddings::{build_embedder, ApiEmbedder};
#[cfg(feature = "local-embeddings")]
pub use embeddings::FastEmbedder;

use crate::types::{truncate_chars, Result};
use crate::utils::config::Settings;
use seeker_memory::{MemoryHit, MemoryStore};
use std::sync::Arc;

/// Characters of each past summary shown to the planner.
pub const PAST_SUMMARY_CHARS: usize = 300;

/// Render memory hits as the planner's past-context block.
///
/// Returns an empty string when there are no hits.
pub fn format_past_context(hits: &[MemoryHit]) -> String {
    hits.iter()
        .map(|hit| {
            format!(
                "- Previous query: \"{}\" (similarity: {})\n  Summary: {}",
                hit.query,
                hit.similarity,
                truncate_chars(&hit.report_summary, PAST_SUMMARY_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Open the store at the configured path with the configured embedder.
///
/// Only an invalid embedding configuration is an error. A memory file that
/// cannot be loaded gives an unavailable store, so research still runs and
/// records the memory failure per session.
pub async fn open_store(settings: &Settings) -> Result<Arc<MemoryStore>> {
    let embedder = build_embedder(settings)?;
    let store = MemoryStore::open_or_unavailable(&settings.memory.path, embedder).await;
    Ok(Arc::new(store))
}
