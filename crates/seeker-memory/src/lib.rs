//! # seeker-memory
//!
//! Persistent semantic memory of past research sessions.
//!
//! Each finished session is stored as a [`MemoryEntry`] holding the question,
//! a report excerpt and an L2-normalized embedding. Later sessions ask the
//! store for similar past questions and feed the digest into planning.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use seeker_memory::{MemoryStore, SearchOptions};
//! use std::sync::Arc;
//!
//! let store = MemoryStore::open("memory.json", Arc::new(my_embedder)).await?;
//! store.add("What is LoRA?", 7, "LoRA is a low-rank adaptation method...").await?;
//!
//! let hits = store.search("Compare LoRA with QLoRA").await?;
//! for hit in hits {
//!     println!("{} ({})", hit.query, hit.similarity);
//! }
//! ```
//!
//! ## Design
//!
//! - The collection is loaded fully on [`MemoryStore::open`] and rewritten
//!   in full on every [`MemoryStore::add`].
//! - [`MemoryStore::open_or_unavailable`] never fails: a file that cannot be
//!   loaded yields a store whose `search` and `add` return
//!   [`Error::Unavailable`] and never touch the file.
//! - Search is a linear scan. The corpus is a single user's local history,
//!   so there is no index.
//! - One active process per memory file. Writers inside one process are
//!   serialized by the store; writers in different processes are not.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod embedder;
pub mod error;
pub mod persistence;
pub mod types;

pub use embedder::Embedder;
pub use error::{Error, Result};
pub use types::{MemoryEntry, MemoryHit, SearchOptions};

use chrono::Utc;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Default number of hits returned by [`MemoryStore::search`].
pub const DEFAULT_TOP_K: usize = 3;

/// Default minimum similarity for [`MemoryStore::search`].
pub const DEFAULT_THRESHOLD: f32 = 0.35;

/// Maximum characters of report summary kept per entry.
pub const SUMMARY_MAX_CHARS: usize = 1000;

/// Characters of the summary that go into the embedded text.
pub const EMBED_SUMMARY_CHARS: usize = 500;

/// Durable log of past sessions with nearest-neighbor recall.
pub struct MemoryStore {
    path: PathBuf,
    embedder: Arc<dyn Embedder>,
    entries: RwLock<Vec<MemoryEntry>>,
    load_error: Option<String>,
}

impl MemoryStore {
    /// Open the store at `path`, loading every existing entry.
    ///
    /// The embedder is not called here; a model that loads lazily stays
    /// unloaded until the first `add` or non-empty `search`.
    #[instrument(skip_all, fields(path = ?path.as_ref()))]
    pub async fn open(path: impl AsRef<Path>, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = persistence::load_entries(&path).await?;

        Ok(Self {
            path,
            embedder,
            entries: RwLock::new(entries),
            load_error: None,
        })
    }

    /// Open the store at `path`, keeping the load failure instead of
    /// returning it.
    ///
    /// When the file cannot be read or decoded the store starts empty and
    /// unavailable: [`search`](Self::search) and [`add`](Self::add) return
    /// [`Error::Unavailable`] and the file is never rewritten.
    pub async fn open_or_unavailable(path: impl AsRef<Path>, embedder: Arc<dyn Embedder>) -> Self {
        let path = path.as_ref().to_path_buf();
        match persistence::load_entries(&path).await {
            Ok(entries) => Self {
                path,
                embedder,
                entries: RwLock::new(entries),
                load_error: None,
            },
            Err(e) => {
                warn!(path = ?path, error = %e, "Memory file could not be loaded, memory disabled");
                Self {
                    path,
                    embedder,
                    entries: RwLock::new(Vec::new()),
                    load_error: Some(e.to_string()),
                }
            }
        }
    }

    /// Why the backing file failed to load, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Whether the store loaded its file and accepts reads and writes.
    pub fn is_available(&self) -> bool {
        self.load_error.is_none()
    }

    fn ensure_available(&self) -> Result<()> {
        match &self.load_error {
            Some(reason) => Err(Error::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the embedding model in use.
    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Snapshot of all entries in insertion order.
    pub async fn entries(&self) -> Vec<MemoryEntry> {
        self.entries.read().await.clone()
    }

    /// Persist a finished session.
    ///
    /// Embeds `"{query} {summary[..500]}"`, truncates the stored summary to
    /// 1000 characters, appends the entry and rewrites the whole file. When
    /// the rewrite fails the entry stays in memory, so the next successful
    /// `add` writes it out as well; the I/O error is returned to the caller.
    #[instrument(skip(self, report_summary), fields(path = ?self.path))]
    pub async fn add(&self, query: &str, findings_count: usize, report_summary: &str) -> Result<()> {
        self.ensure_available()?;
        let text = format!(
            "{} {}",
            query,
            truncate_chars(report_summary, EMBED_SUMMARY_CHARS)
        );
        let embedding = self.embed_normalized(&text).await?;

        let entry = MemoryEntry {
            query: query.to_string(),
            findings_count,
            report_summary: truncate_chars(report_summary, SUMMARY_MAX_CHARS).to_string(),
            embedding,
            timestamp: Utc::now(),
        };

        let mut entries = self.entries.write().await;
        entries.push(entry);
        persistence::save_entries(&self.path, &entries).await?;

        info!(count = entries.len(), "Stored research session in memory");
        Ok(())
    }

    /// Find past sessions similar to `query` using the default options
    /// (top 3, threshold 0.35).
    pub async fn search(&self, query: &str) -> Result<Vec<MemoryHit>> {
        self.search_with(query, SearchOptions::default()).await
    }

    /// Find past sessions similar to `query`.
    ///
    /// Scores every entry by cosine similarity, keeps those at or above the
    /// threshold, sorts by descending similarity (ties keep insertion order)
    /// and returns at most `top_k`. An empty store returns an empty list
    /// without embedding the query.
    #[instrument(skip(self), fields(top_k = options.top_k, threshold = options.threshold))]
    pub async fn search_with(&self, query: &str, options: SearchOptions) -> Result<Vec<MemoryHit>> {
        self.ensure_available()?;
        if self.is_empty().await || options.top_k == 0 {
            return Ok(Vec::new());
        }

        let probe = self.embed_normalized(query).await?;
        let entries = self.entries.read().await;

        let mut scored: Vec<(f32, &MemoryEntry)> = Vec::new();
        for entry in entries.iter() {
            let similarity = match distance::cosine_similarity_normalized(&probe, &entry.embedding) {
                Ok(s) => s,
                Err(e) => {
                    warn!(query = %entry.query, error = %e, "Skipping memory entry");
                    continue;
                }
            };
            if similarity >= options.threshold {
                scored.push((similarity, entry));
            }
        }

        // sort_by is stable, so equal scores keep insertion order
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(options.top_k);

        debug!(hits = scored.len(), "Memory search complete");

        Ok(scored
            .into_iter()
            .map(|(similarity, entry)| MemoryHit {
                query: entry.query.clone(),
                report_summary: entry.report_summary.clone(),
                similarity: distance::round3(similarity),
            })
            .collect())
    }

    async fn embed_normalized(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = self.embedder.embed(text).await?;
        distance::normalize(&mut vector)?;
        Ok(vector)
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("path", &self.path)
            .field("model", &self.embedder.model_name())
            .field("load_error", &self.load_error)
            .finish()
    }
}

/// Longest prefix of `s` with at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
