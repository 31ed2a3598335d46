use crate::llm::LLMClient;
use crate::research::prompts::{planner_system_prompt, planner_user_prompt};
use crate::types::{AppError, Result, SubTask};
use serde::Deserialize;
use std::sync::Arc;

/// Splits a research question into an ordered list of sub-tasks.
pub struct Planner {
    llm: Arc<dyn LLMClient>,
    max_sub_tasks: usize,
}

#[derive(Debug, Deserialize)]
struct PlanResponse {
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    sub_tasks: Vec<PlannedTask>,
}

#[derive(Debug, Deserialize)]
struct PlannedTask {
    query: String,
    tool: String,
}

impl Planner {
    pub fn new(llm: Arc<dyn LLMClient>, max_sub_tasks: usize) -> Self {
        Self { llm, max_sub_tasks }
    }

    pub fn with_max_sub_tasks(mut self, max_sub_tasks: usize) -> Self {
        self.max_sub_tasks = max_sub_tasks;
        self
    }

    pub fn max_sub_tasks(&self) -> usize {
        self.max_sub_tasks
    }

    /// Ask the model for a plan. Any failure here is fatal to the run.
    pub async fn plan(&self, query: &str, past_context: &str) -> Result<Vec<SubTask>> {
        let raw = self
            .llm
            .generate_with_system(
                &planner_system_prompt(self.max_sub_tasks),
                &planner_user_prompt(query, past_context),
            )
            .await
            .map_err(|e| AppError::Planning(e.to_string()))?;

        parse_plan(&raw, self.max_sub_tasks)
    }
}

/// Parse the model's JSON plan, keeping at most `max_sub_tasks` entries.
///
/// Tool names are not checked here; an unknown tool fails its own sub-task
/// when the orchestrator reaches it.
pub fn parse_plan(raw: &str, max_sub_tasks: usize) -> Result<Vec<SubTask>> {
    let json = extract_json(raw);
    let plan: PlanResponse = serde_json::from_str(json).map_err(|e| {
        AppError::Planning(format!(
            "Could not parse plan: {} (output: {})",
            e,
            crate::types::truncate_chars(raw, 200)
        ))
    })?;

    if !plan.reasoning.is_empty() {
        tracing::debug!(reasoning = %plan.reasoning, "Planner reasoning");
    }

    let sub_tasks: Vec<SubTask> = plan
        .sub_tasks
        .into_iter()
        .filter(|t| !t.query.trim().is_empty() && !t.tool.trim().is_empty())
        .take(max_sub_tasks)
        .enumerate()
        .map(|(id, t)| SubTask::pending(id, t.query.trim(), t.tool.trim().to_lowercase()))
        .collect();

    if sub_tasks.is_empty() {
        return Err(AppError::Planning(
            "Plan contained no sub-tasks".to_string(),
        ));
    }

    Ok(sub_tasks)
}

/// Strip markdown fences and any prose around the outermost JSON object.
fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}
