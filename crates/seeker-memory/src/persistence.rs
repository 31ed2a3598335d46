//! Persistence layer for the memory store.
//!
//! The whole collection lives in one pretty-printed JSON array. It is read
//! once when the store opens and rewritten in full on every append. There is
//! no locking across processes; one active process per file is assumed.

use crate::error::Result;
use crate::types::MemoryEntry;
use std::path::Path;
use tracing::{debug, info};

/// Load every entry from `path`.
///
/// A missing file is an empty store, not an error.
pub async fn load_entries(path: &Path) -> Result<Vec<MemoryEntry>> {
    if !tokio::fs::try_exists(path).await? {
        debug!(path = ?path, "No memory file yet, starting empty");
        return Ok(Vec::new());
    }

    let raw = tokio::fs::read_to_string(path).await?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<MemoryEntry> = serde_json::from_str(&raw)?;
    info!(path = ?path, count = entries.len(), "Loaded memory entries");
    Ok(entries)
}

/// Overwrite `path` with the full collection, creating parent directories.
pub async fn save_entries(path: &Path, entries: &[MemoryEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(entries)?;
    tokio::fs::write(path, json).await?;

    debug!(path = ?path, count = entries.len(), "Rewrote memory file");
    Ok(())
}
