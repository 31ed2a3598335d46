//! Multi-Step Research Pipeline
//!
//! A research run is an explicit state machine over an immutable
//! [`Session`](state::Session):
//!
//! ```text
//! RetrieveMemory -> Plan -> Research* -> Synthesize -> PersistMemory -> Done
//! ```
//!
//! # Architecture
//!
//! - [`graph`] - The [`Step`](graph::Step) enum and pure routing
//!   ([`should_continue`](graph::should_continue), [`next_state`](graph::next_state))
//! - [`state`] - Session snapshots and the [`SessionUpdate`](state::SessionUpdate) reducer
//! - [`planner`] - Turns a question (plus past context) into sub-tasks
//! - [`synthesizer`] - Writes the cited report
//! - [`orchestrator`] - Runs the steps, isolating per-sub-task failures
//! - [`prompts`] - Prompt text for both model calls
//!
//! # Usage
//!
//! ```ignore
//! use seeker::research::ResearchOrchestrator;
//!
//! let orchestrator = ResearchOrchestrator::from_settings(&settings, memory)?;
//! let outcome = orchestrator.run("What is LoRA?").await?;
//!
//! println!("{}", outcome.final_report);
//! for error in &outcome.errors {
//!     eprintln!("- {}", error);
//! }
//! ```

pub mod graph;
pub mod orchestrator;
pub mod planner;
pub mod prompts;
pub mod state;
pub mod synthesizer;

pub use graph::{next_state, should_continue, Route, Step};
pub use orchestrator::{ResearchOrchestrator, ResearchOutcome, ENRICH_LIMIT};
pub use planner::{parse_plan, Planner};
pub use state::{Session, SessionUpdate, TaskResult};
pub use synthesizer::Synthesizer;
