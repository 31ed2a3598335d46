//! The research state machine: steps and the pure routing between them.
//!
//! ```text
//! RetrieveMemory -> Plan -> Research* -> Synthesize -> PersistMemory -> Done
//! ```

use crate::research::state::Session;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    RetrieveMemory,
    Plan,
    /// Runs one sub-task; repeats while sub-tasks remain.
    Research,
    Synthesize,
    PersistMemory,
    Done,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::RetrieveMemory => "retrieve_memory",
            Step::Plan => "plan",
            Step::Research => "research",
            Step::Synthesize => "synthesize",
            Step::PersistMemory => "persist_memory",
            Step::Done => "done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Done)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of the single branching decision in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ContinueResearch,
    Synthesize,
}

/// Keep researching while the cursor is below the sub-task count.
pub fn should_continue(current_task_index: usize, task_count: usize) -> Route {
    if current_task_index < task_count {
        Route::ContinueResearch
    } else {
        Route::Synthesize
    }
}

/// The step that follows `step` given the session it produced.
pub fn next_state(step: Step, session: &Session) -> Step {
    match step {
        Step::RetrieveMemory => Step::Plan,
        Step::Plan | Step::Research => {
            match should_continue(session.current_task_index, session.sub_tasks.len()) {
                Route::ContinueResearch => Step::Research,
                Route::Synthesize => Step::Synthesize,
            }
        }
        Step::Synthesize => Step::PersistMemory,
        Step::PersistMemory | Step::Done => Step::Done,
    }
}
