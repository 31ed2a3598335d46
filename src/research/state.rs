//! Run-scoped session snapshots and the reducer that merges step output.

use crate::types::{Finding, SubTask, TaskStatus};
use serde::Serialize;

/// Everything a research run knows at one point in time.
///
/// Steps never mutate a session in place. Each step returns a
/// [`SessionUpdate`] and the orchestrator folds it in with
/// [`Session::apply`], producing the next snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    pub original_query: String,
    pub sub_tasks: Vec<SubTask>,
    /// Index of the next sub-task to run. Never exceeds `sub_tasks.len()`.
    pub current_task_index: usize,
    /// Findings of every executed sub-task, in execution order.
    pub all_findings: Vec<Finding>,
    pub errors: Vec<String>,
    /// Empty until synthesis succeeds.
    pub final_report: String,
    /// Digest of related past sessions, set once before planning.
    pub past_context: String,
}

impl Session {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            original_query: query.into(),
            ..Default::default()
        }
    }

    /// The sub-task under the cursor, if any remain.
    pub fn current_task(&self) -> Option<&SubTask> {
        self.sub_tasks.get(self.current_task_index)
    }

    /// Fold `update` into a new snapshot.
    ///
    /// `all_findings` and `errors` are appended to; every other field is
    /// overwritten when the update carries a value. A sub-task result only
    /// lands on a task that is still pending, and the cursor only moves
    /// forward and stays within `sub_tasks.len()`.
    pub fn apply(&self, update: SessionUpdate) -> Session {
        let mut next = self.clone();

        if let Some(past_context) = update.past_context {
            next.past_context = past_context;
        }

        if let Some(sub_tasks) = update.sub_tasks {
            next.sub_tasks = sub_tasks;
            next.current_task_index = 0;
        }

        if let Some(result) = update.task_result {
            if let Some(task) = next.sub_tasks.iter_mut().find(|t| t.id == result.id) {
                if task.status.can_transition_to(result.status) {
                    task.status = result.status;
                    task.findings = result.findings;
                } else {
                    tracing::warn!(
                        task_id = task.id,
                        from = ?task.status,
                        to = ?result.status,
                        "Ignoring status change on a finished sub-task"
                    );
                }
            }
        }

        if let Some(index) = update.current_task_index {
            next.current_task_index = index
                .max(next.current_task_index)
                .min(next.sub_tasks.len());
        }

        next.all_findings.extend(update.new_findings);
        next.errors.extend(update.new_errors);

        if let Some(report) = update.final_report {
            next.final_report = report;
        }

        next
    }
}

/// Terminal outcome of one sub-task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub id: usize,
    pub status: TaskStatus,
    pub findings: Vec<Finding>,
}

/// Partial session produced by a single step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUpdate {
    pub past_context: Option<String>,
    /// A fresh plan; resets the cursor to 0.
    pub sub_tasks: Option<Vec<SubTask>>,
    pub task_result: Option<TaskResult>,
    pub current_task_index: Option<usize>,
    pub new_findings: Vec<Finding>,
    pub new_errors: Vec<String>,
    pub final_report: Option<String>,
}

impl SessionUpdate {
    pub fn past_context(context: impl Into<String>) -> Self {
        Self {
            past_context: Some(context.into()),
            ..Default::default()
        }
    }

    pub fn plan(sub_tasks: Vec<SubTask>) -> Self {
        Self {
            sub_tasks: Some(sub_tasks),
            ..Default::default()
        }
    }

    /// Mark sub-task `id` done with `findings` and move the cursor past it.
    pub fn task_done(id: usize, findings: Vec<Finding>) -> Self {
        Self {
            task_result: Some(TaskResult {
                id,
                status: TaskStatus::Done,
                findings: findings.clone(),
            }),
            current_task_index: Some(id + 1),
            new_findings: findings,
            ..Default::default()
        }
    }

    /// Mark sub-task `id` failed, record `error` and move the cursor past it.
    pub fn task_failed(id: usize, error: impl Into<String>) -> Self {
        Self {
            task_result: Some(TaskResult {
                id,
                status: TaskStatus::Failed,
                findings: Vec::new(),
            }),
            current_task_index: Some(id + 1),
            new_errors: vec![error.into()],
            ..Default::default()
        }
    }

    pub fn report(report: impl Into<String>) -> Self {
        Self {
            final_report: Some(report.into()),
            ..Default::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            new_errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// An update that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }
}
