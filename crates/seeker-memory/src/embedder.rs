//! The embedding seam.
//!
//! The store does not own or load a model. Callers hand it an [`Embedder`]
//! at construction time and decide themselves whether that embedder is a
//! process-wide singleton.

use crate::error::Result;
use async_trait::async_trait;

/// Turns text into a fixed-length vector.
///
/// Implementations do not need to normalize their output; the store
/// normalizes every vector before storing or comparing it.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Identifier of the underlying model, for logs.
    fn model_name(&self) -> &str;
}
