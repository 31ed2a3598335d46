use crate::{
    types::{AppError, MemorySearchRequest, MemorySearchResponse, Result},
    AppState,
};
use axum::{extract::State, Json};
use seeker_memory::SearchOptions;
use serde_json::{json, Value};

/// Find past sessions similar to a query.
pub async fn search_memory(
    State(state): State<AppState>,
    Json(payload): Json<MemorySearchRequest>,
) -> Result<Json<MemorySearchResponse>> {
    if payload.query.trim().is_empty() {
        return Err(AppError::InvalidInput("Query must not be empty".to_string()));
    }

    let mut options = SearchOptions::default();
    if let Some(top_k) = payload.top_k {
        options = options.with_top_k(top_k);
    }
    if let Some(threshold) = payload.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AppError::InvalidInput(
                "threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        options = options.with_threshold(threshold);
    }

    let hits = state.memory.search_with(&payload.query, options).await?;

    Ok(Json(MemorySearchResponse {
        hits,
        total_entries: state.memory.len().await,
    }))
}

/// Memory file location, entry count and embedding model.
///
/// `load_error` is set when the file could not be loaded at startup.
pub async fn memory_stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "path": state.memory.path().display().to_string(),
        "total_entries": state.memory.len().await,
        "embedding_model": state.memory.model_name(),
        "load_error": state.memory.load_error(),
    }))
}
