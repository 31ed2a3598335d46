//! Record types held by the memory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One persisted research session.
///
/// Entries are append-only: the store never updates or deletes them. Records
/// without `findings_count` or `timestamp` still load with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// The question that started the session.
    pub query: String,
    /// How many findings the session collected. Informational only.
    #[serde(default)]
    pub findings_count: usize,
    /// Report excerpt, at most [`crate::SUMMARY_MAX_CHARS`] characters.
    pub report_summary: String,
    /// L2-normalized embedding of the query plus the head of the summary.
    pub embedding: Vec<f32>,
    /// When the entry was created. Written as RFC 3339; read from either
    /// RFC 3339 text or Unix epoch seconds (integer or fractional).
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    EpochSeconds(f64),
    Text(String),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::EpochSeconds(secs) => epoch_seconds_to_datetime(secs)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {secs}"))),
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid timestamp {text:?}: {e}"))),
    }
}

fn epoch_seconds_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    // f64 epoch seconds only carry about microsecond precision
    let micros = (secs * 1e6).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}

/// A past session that cleared the similarity threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryHit {
    /// The original question of the past session.
    pub query: String,
    /// The stored (already truncated) report summary.
    pub report_summary: String,
    /// Cosine similarity to the probe, rounded to three decimals.
    pub similarity: f32,
}

/// Parameters for [`crate::MemoryStore::search_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Maximum number of hits to return.
    pub top_k: usize,
    /// Minimum similarity (inclusive) a hit must reach.
    pub threshold: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: crate::DEFAULT_TOP_K,
            threshold: crate::DEFAULT_THRESHOLD,
        }
    }
}

impl SearchOptions {
    /// Override the number of hits.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Override the similarity threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}
