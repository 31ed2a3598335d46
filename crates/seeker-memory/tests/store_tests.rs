//! Integration tests for the memory store
//!
//! Uses a deterministic table-driven embedder so similarities are known
//! exactly, and `tempfile` directories for the backing file.

use async_trait::async_trait;
use seeker_memory::{Embedder, Error, MemoryStore, SearchOptions};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Embedder that maps known texts to fixed vectors and everything else to
/// a vector orthogonal to all of them.
struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl TableEmbedder {
    fn new(pairs: &[(&str, [f32; 3])]) -> Self {
        Self {
            table: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_vec()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for TableEmbedder {
    async fn embed(&self, text: &str) -> seeker_memory::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .table
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0, 0.0, 1.0]))
    }

    fn model_name(&self) -> &str {
        "table"
    }
}

struct BrokenEmbedder;

#[async_trait]
impl Embedder for BrokenEmbedder {
    async fn embed(&self, _text: &str) -> seeker_memory::Result<Vec<f32>> {
        Err(Error::Embedding("model unavailable".to_string()))
    }

    fn model_name(&self) -> &str {
        "broken"
    }
}

/// Stored texts are "{query} {summary}", probes are the bare query.
fn ordering_embedder() -> Arc<TableEmbedder> {
    Arc::new(TableEmbedder::new(&[
        ("close close", [1.0, 0.1, 0.0]),
        ("middle middle", [1.0, 1.0, 0.0]),
        ("far far", [0.3, 1.0, 0.0]),
        ("probe", [1.0, 0.0, 0.0]),
    ]))
}

async fn store_in(dir: &TempDir, embedder: Arc<dyn Embedder>) -> MemoryStore {
    MemoryStore::open(dir.path().join("memory.json"), embedder)
        .await
        .expect("open store")
}

#[tokio::test]
async fn test_add_and_len() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, ordering_embedder()).await;

    assert_eq!(store.len().await, 0);
    store
        .add("What is LoRA?", 1, "LoRA is a parameter-efficient fine-tuning method.")
        .await
        .unwrap();
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    let embedder = ordering_embedder();

    let store = MemoryStore::open(&path, embedder.clone()).await.unwrap();
    let before = store.len().await;
    store
        .add("What is LoRA?", 0, "LoRA enables efficient fine-tuning.")
        .await
        .unwrap();
    assert!(path.exists());

    let reopened = MemoryStore::open(&path, embedder).await.unwrap();
    assert_eq!(reopened.len().await, before + 1);
    let entries = reopened.entries().await;
    assert_eq!(entries.last().unwrap().query, "What is LoRA?");
}

#[tokio::test]
async fn test_stored_embedding_is_unit_length() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, ordering_embedder()).await;
    store.add("middle", 0, "middle").await.unwrap();

    let entry = &store.entries().await[0];
    let norm: f32 = entry.embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn test_summary_truncated_to_1000_chars() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, ordering_embedder()).await;
    let long = "x".repeat(2500);

    store.add("long", 3, &long).await.unwrap();

    let entry = &store.entries().await[0];
    assert_eq!(entry.report_summary.chars().count(), 1000);
    assert_eq!(entry.findings_count, 3);
}

#[tokio::test]
async fn test_search_orders_by_similarity() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, ordering_embedder()).await;
    // inserted out of order on purpose
    store.add("far", 0, "far").await.unwrap();
    store.add("close", 0, "close").await.unwrap();
    store.add("middle", 0, "middle").await.unwrap();

    let hits = store
        .search_with("probe", SearchOptions::default().with_threshold(0.1))
        .await
        .unwrap();

    let queries: Vec<&str> = hits.iter().map(|h| h.query.as_str()).collect();
    assert_eq!(queries, vec!["close", "middle", "far"]);
    assert!(hits[0].similarity >= hits[1].similarity);
    assert!(hits[1].similarity >= hits[2].similarity);
}

#[tokio::test]
async fn test_raising_threshold_drops_least_similar() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, ordering_embedder()).await;
    store.add("far", 0, "far").await.unwrap();
    store.add("close", 0, "close").await.unwrap();
    store.add("middle", 0, "middle").await.unwrap();

    let all = store
        .search_with("probe", SearchOptions::default().with_threshold(0.1))
        .await
        .unwrap();
    let lowest = all.last().unwrap().similarity;

    let filtered = store
        .search_with("probe", SearchOptions::default().with_threshold(lowest + 0.01))
        .await
        .unwrap();

    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|h| h.query != "far"));
}

#[tokio::test]
async fn test_top_k_limits_results() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, ordering_embedder()).await;
    store.add("far", 0, "far").await.unwrap();
    store.add("close", 0, "close").await.unwrap();
    store.add("middle", 0, "middle").await.unwrap();

    let hits = store
        .search_with(
            "probe",
            SearchOptions::default().with_threshold(0.0).with_top_k(1),
        )
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].query, "close");
}

#[tokio::test]
async fn test_ties_keep_insertion_order() {
    let dir = TempDir::new().unwrap();
    let embedder = Arc::new(TableEmbedder::new(&[
        ("first same", [1.0, 0.0, 0.0]),
        ("second same", [1.0, 0.0, 0.0]),
        ("probe", [1.0, 0.0, 0.0]),
    ]));
    let store = store_in(&dir, embedder).await;
    store.add("first", 0, "same").await.unwrap();
    store.add("second", 0, "same").await.unwrap();

    let hits = store.search("probe").await.unwrap();
    assert_eq!(hits[0].query, "first");
    assert_eq!(hits[1].query, "second");
    assert_eq!(hits[0].similarity, 1.0);
}

#[tokio::test]
async fn test_similarity_rounded_to_three_decimals() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, ordering_embedder()).await;
    store.add("middle", 0, "middle").await.unwrap();

    let hits = store.search("probe").await.unwrap();
    // cos 45 degrees = 0.70710678...
    assert_eq!(hits[0].similarity, 0.707);
}

#[tokio::test]
async fn test_default_threshold_filters_unrelated() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, ordering_embedder()).await;
    store.add("close", 0, "close").await.unwrap();

    // unknown text embeds orthogonally to everything stored
    let hits = store.search("quantum computing algorithms").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_empty_store_search_is_empty_for_any_threshold() {
    let dir = TempDir::new().unwrap();
    let embedder = ordering_embedder();
    let store = store_in(&dir, embedder.clone()).await;

    for threshold in [-1.0, 0.0, 0.35, 0.9] {
        let hits = store
            .search_with("anything", SearchOptions::default().with_threshold(threshold))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }
    // the model is never touched for an empty store
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_embedder_not_called_on_open() {
    let dir = TempDir::new().unwrap();
    let embedder = ordering_embedder();
    let _store = store_in(&dir, embedder.clone()).await;
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_embedding_failure_propagates() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, Arc::new(BrokenEmbedder)).await;

    let err = store.add("q", 0, "s").await.unwrap_err();
    assert!(matches!(err, Error::Embedding(_)));
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_write_failure_propagates() {
    let dir = TempDir::new().unwrap();
    let parent = dir.path().join("sub");
    let store = MemoryStore::open(parent.join("memory.json"), ordering_embedder())
        .await
        .unwrap();
    // the parent directory is now a regular file and cannot be created
    std::fs::write(&parent, "not a directory").unwrap();

    let err = store.add("close", 0, "close").await.unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn test_mismatched_dimensions_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    std::fs::write(
        &path,
        r#"[{"query": "legacy", "report_summary": "s", "embedding": [1.0, 0.0]}]"#,
    )
    .unwrap();

    let store = MemoryStore::open(&path, ordering_embedder()).await.unwrap();
    store.add("close", 0, "close").await.unwrap();

    let hits = store.search("probe").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].query, "close");
}

#[tokio::test]
async fn test_loads_file_with_epoch_second_timestamps() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("memory.json"),
        r#"[
  {
    "query": "What is LoRA?",
    "findings_count": 4,
    "report_summary": "LoRA trains low-rank adapters.",
    "embedding": [1.0, 0.0, 0.0],
    "timestamp": 1718000000.123
  }
]"#,
    )
    .unwrap();
    let embedder = Arc::new(TableEmbedder::new(&[("LoRA", [1.0, 0.0, 0.0])]));

    let store = store_in(&dir, embedder).await;

    let entries = store.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].findings_count, 4);
    assert_eq!(entries[0].timestamp.timestamp(), 1_718_000_000);
    assert_eq!(entries[0].timestamp.timestamp_subsec_millis(), 123);

    let hits = store.search("LoRA").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].query, "What is LoRA?");

    // appending keeps the old entry readable
    store.add("QLoRA", 2, "Quantized LoRA.").await.unwrap();
    let reopened = store_in(&dir, Arc::new(TableEmbedder::new(&[]))).await;
    assert_eq!(reopened.len().await, 2);
}

#[tokio::test]
async fn test_corrupt_file_opens_unavailable_and_is_never_rewritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    std::fs::write(&path, "{not json").unwrap();
    let embedder = Arc::new(TableEmbedder::new(&[]));

    assert!(MemoryStore::open(&path, embedder.clone()).await.is_err());

    let store = MemoryStore::open_or_unavailable(&path, embedder.clone()).await;
    assert!(!store.is_available());
    assert!(store.load_error().is_some());
    assert!(store.is_empty().await);

    assert!(matches!(store.search("anything").await, Err(Error::Unavailable(_))));
    assert!(matches!(
        store.add("q", 1, "summary").await,
        Err(Error::Unavailable(_))
    ));
    assert_eq!(embedder.calls(), 0);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
}

#[tokio::test]
async fn test_missing_file_opens_available() {
    let dir = TempDir::new().unwrap();
    let store =
        MemoryStore::open_or_unavailable(dir.path().join("memory.json"), ordering_embedder())
            .await;

    assert!(store.is_available());
    store.add("close", 1, "close").await.unwrap();
    assert_eq!(store.len().await, 1);
}
