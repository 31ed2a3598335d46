//! Embedding backends for the memory store.
//!
//! - [`FastEmbedder`] runs a local ONNX model through fastembed (feature
//!   `local-embeddings`, on by default). The model is loaded on the first
//!   call and reused for the life of the embedder.
//! - [`ApiEmbedder`] calls an OpenAI-compatible `/embeddings` endpoint.

use crate::types::Result;
use crate::utils::config::Settings;
use async_trait::async_trait;
use seeker_memory::Embedder;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "local-embeddings")]
pub use local::FastEmbedder;

#[cfg(feature = "local-embeddings")]
mod local {
    use async_trait::async_trait;
    use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
    use parking_lot::Mutex;
    use seeker_memory::{Embedder, Error};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::OnceCell;

    pub struct FastEmbedder {
        model_name: String,
        model: EmbeddingModel,
        cache_dir: PathBuf,
        engine: OnceCell<Arc<Mutex<TextEmbedding>>>,
    }

    impl FastEmbedder {
        /// Accepts the short or the Hugging Face name of a supported model.
        pub fn new(model_name: &str) -> crate::types::Result<Self> {
            let model = match model_name {
                "all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L6-v2" => {
                    EmbeddingModel::AllMiniLML6V2
                }
                "bge-small-en-v1.5" | "BAAI/bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
                "bge-base-en-v1.5" | "BAAI/bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
                other => {
                    return Err(crate::types::AppError::Configuration(format!(
                        "Unsupported local embedding model '{}'. Use all-MiniLM-L6-v2, \
                         bge-small-en-v1.5 or bge-base-en-v1.5, or set EMBEDDING_API_BASE",
                        other
                    )))
                }
            };

            let cache_dir = dirs::cache_dir().map_or_else(
                || PathBuf::from(".fastembed_cache"),
                |dir| dir.join("seeker").join("fastembed"),
            );

            Ok(Self {
                model_name: model_name.to_string(),
                model,
                cache_dir,
                engine: OnceCell::new(),
            })
        }

        async fn engine(&self) -> seeker_memory::Result<Arc<Mutex<TextEmbedding>>> {
            let engine = self
                .engine
                .get_or_try_init(|| async {
                    tracing::info!(model = %self.model_name, "Loading local embedding model");
                    let options = TextInitOptions::new(self.model.clone())
                        .with_cache_dir(self.cache_dir.clone())
                        .with_show_download_progress(false);
                    let engine = tokio::task::spawn_blocking(move || TextEmbedding::try_new(options))
                        .await
                        .map_err(|e| Error::Embedding(format!("Model loader panicked: {}", e)))?
                        .map_err(|e| Error::Embedding(format!("Failed to load model: {}", e)))?;
                    Ok::<_, Error>(Arc::new(Mutex::new(engine)))
                })
                .await?;
            Ok(Arc::clone(engine))
        }
    }

    #[async_trait]
    impl Embedder for FastEmbedder {
        async fn embed(&self, text: &str) -> seeker_memory::Result<Vec<f32>> {
            let engine = self.engine().await?;
            let text = text.to_string();

            let mut vectors = tokio::task::spawn_blocking(move || engine.lock().embed(vec![text], None))
                .await
                .map_err(|e| Error::Embedding(format!("Embedding task panicked: {}", e)))?
                .map_err(|e| Error::Embedding(e.to_string()))?;

            vectors
                .pop()
                .ok_or_else(|| Error::Embedding("Model returned no embedding".to_string()))
        }

        fn model_name(&self) -> &str {
            &self.model_name
        }
    }

}

/// Embeddings from an OpenAI-compatible HTTP endpoint.
pub struct ApiEmbedder {
    http_client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl ApiEmbedder {
    pub fn new(api_base: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    async fn embed(&self, text: &str) -> seeker_memory::Result<Vec<f32>> {
        use seeker_memory::Error;

        let mut request = self
            .http_client
            .post(format!("{}/embeddings", self.api_base))
            .json(&json!({ "model": self.model, "input": text }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Embedding request failed: {}", e)))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Embedding request failed ({}): {}",
                status, body
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Invalid embedding response: {}", e)))?;

        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::Embedding("Embedding response had no data".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Pick the embedding backend described by `settings`.
pub fn build_embedder(settings: &Settings) -> Result<Arc<dyn Embedder>> {
    let embedding = &settings.embedding;

    if let Some(api_base) = &embedding.api_base {
        return Ok(Arc::new(ApiEmbedder::new(
            api_base.clone(),
            embedding.api_key.clone(),
            embedding.model.clone(),
        )));
    }

    #[cfg(feature = "local-embeddings")]
    {
        Ok(Arc::new(FastEmbedder::new(&embedding.model)?))
    }

    #[cfg(not(feature = "local-embeddings"))]
    {
        Err(crate::types::AppError::Configuration(
            "Built without local-embeddings; set EMBEDDING_API_BASE".to_string(),
        ))
    }
}
