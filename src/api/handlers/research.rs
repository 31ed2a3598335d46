use crate::{
    types::{AppError, ResearchRequest, ResearchResponse, Result},
    AppState,
};
use axum::{extract::State, Json};
use std::time::Instant;

/// Run the full research pipeline for a query.
///
/// Sub-task, memory and synthesis failures are reported in `errors` with a
/// 200 response; only an empty query (400) or a planning failure (502) is
/// an error status.
pub async fn research(
    State(state): State<AppState>,
    Json(payload): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>> {
    if payload.query.trim().is_empty() {
        return Err(AppError::InvalidInput("Query must not be empty".to_string()));
    }

    let start = Instant::now();
    let outcome = state.orchestrator.run(&payload.query).await?;
    let duration = start.elapsed();

    Ok(Json(ResearchResponse {
        final_report: outcome.final_report,
        errors: outcome.errors,
        findings: outcome.session.all_findings,
        sub_tasks: outcome.session.sub_tasks,
        duration_ms: duration.as_millis() as u64,
    }))
}
