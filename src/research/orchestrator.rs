use crate::llm::{build_llm_client, LLMClient};
use crate::memory::format_past_context;
use crate::research::graph::{next_state, Step};
use crate::research::planner::Planner;
use crate::research::state::{Session, SessionUpdate};
use crate::research::synthesizer::Synthesizer;
use crate::tools::{HttpPageReader, PageReader, ToolError, ToolRegistry};
use crate::types::{AppError, Finding, Result, SourceType, SubTask};
use crate::utils::config::{Settings, DEFAULT_MAX_SUB_TASKS};
use seeker_memory::MemoryStore;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Findings per sub-task whose snippet is replaced with full page text.
pub const ENRICH_LIMIT: usize = 2;

/// Result of one research run.
#[derive(Debug, Clone)]
pub struct ResearchOutcome {
    /// Empty when synthesis failed; see `errors`.
    pub final_report: String,
    pub errors: Vec<String>,
    /// The final session snapshot.
    pub session: Session,
    /// Every step executed, in order, ending with [`Step::Done`].
    pub visited: Vec<Step>,
}

impl ResearchOutcome {
    pub fn has_report(&self) -> bool {
        !self.final_report.is_empty()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.session.all_findings
    }

    pub fn sub_tasks(&self) -> &[SubTask] {
        &self.session.sub_tasks
    }
}

/// Drives a query through memory retrieval, planning, per-sub-task
/// research, synthesis and memory persistence.
///
/// Sub-tasks run one at a time in planned order. Only a planning failure
/// ends a run early; every other failure is recorded in the session's
/// `errors` and the run carries on to [`Step::Done`].
pub struct ResearchOrchestrator {
    planner: Planner,
    synthesizer: Synthesizer,
    registry: Arc<ToolRegistry>,
    reader: Arc<dyn PageReader>,
    memory: Arc<MemoryStore>,
}

impl ResearchOrchestrator {
    pub fn new(
        llm: Arc<dyn LLMClient>,
        registry: Arc<ToolRegistry>,
        reader: Arc<dyn PageReader>,
        memory: Arc<MemoryStore>,
    ) -> Self {
        Self {
            planner: Planner::new(Arc::clone(&llm), DEFAULT_MAX_SUB_TASKS),
            synthesizer: Synthesizer::new(llm),
            registry,
            reader,
            memory,
        }
    }

    /// Wire the production model client, all seven tools and the HTTP page
    /// reader from settings.
    pub fn from_settings(settings: &Settings, memory: Arc<MemoryStore>) -> Result<Self> {
        let llm = build_llm_client(settings)?;
        let registry = Arc::new(ToolRegistry::with_settings(settings));
        let reader: Arc<dyn PageReader> = Arc::new(HttpPageReader::new());

        Ok(Self::new(llm, registry, reader, memory)
            .with_max_sub_tasks(settings.research.max_sub_tasks))
    }

    pub fn with_max_sub_tasks(mut self, max_sub_tasks: usize) -> Self {
        self.planner = self.planner.with_max_sub_tasks(max_sub_tasks);
        self
    }

    pub fn memory(&self) -> &Arc<MemoryStore> {
        &self.memory
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Run the full pipeline for `query`.
    ///
    /// Returns `Err` only for [`AppError::Planning`] (and invalid input).
    #[instrument(skip_all, fields(query = %query, run_id = tracing::field::Empty))]
    pub async fn run(&self, query: &str) -> Result<ResearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput("Query must not be empty".to_string()));
        }
        tracing::Span::current().record("run_id", tracing::field::display(Uuid::new_v4()));

        let mut session = Session::new(query);
        let mut step = Step::RetrieveMemory;
        let mut visited = Vec::new();

        loop {
            visited.push(step);
            if step.is_terminal() {
                break;
            }

            let update = self.execute(step, &session).await?;
            session = session.apply(update);

            let next = next_state(step, &session);
            debug!(from = %step, to = %next, cursor = session.current_task_index, "Transition");
            step = next;
        }

        info!(
            findings = session.all_findings.len(),
            errors = session.errors.len(),
            has_report = !session.final_report.is_empty(),
            "Research run finished"
        );

        Ok(ResearchOutcome {
            final_report: session.final_report.clone(),
            errors: session.errors.clone(),
            session,
            visited,
        })
    }

    async fn execute(&self, step: Step, session: &Session) -> Result<SessionUpdate> {
        match step {
            Step::RetrieveMemory => Ok(self.retrieve_memory(session).await),
            Step::Plan => self.plan(session).await,
            Step::Research => Ok(self.research(session).await),
            Step::Synthesize => Ok(self.synthesize(session).await),
            Step::PersistMemory => Ok(self.persist_memory(session).await),
            Step::Done => Ok(SessionUpdate::none()),
        }
    }

    async fn retrieve_memory(&self, session: &Session) -> SessionUpdate {
        match self.memory.search(&session.original_query).await {
            Ok(hits) => {
                info!(hits = hits.len(), "Retrieved past research context");
                SessionUpdate::past_context(format_past_context(&hits))
            }
            Err(e) => {
                warn!(error = %e, "Memory retrieval failed, continuing without past context");
                SessionUpdate {
                    past_context: Some(String::new()),
                    new_errors: vec![format!("Memory retrieval failed: {}", e)],
                    ..Default::default()
                }
            }
        }
    }

    async fn plan(&self, session: &Session) -> Result<SessionUpdate> {
        let sub_tasks = self
            .planner
            .plan(&session.original_query, &session.past_context)
            .await?;

        info!(
            count = sub_tasks.len(),
            tools = ?sub_tasks.iter().map(|t| t.tool.as_str()).collect::<Vec<_>>(),
            "Planned sub-tasks"
        );
        Ok(SessionUpdate::plan(sub_tasks))
    }

    async fn research(&self, session: &Session) -> SessionUpdate {
        let Some(task) = session.current_task() else {
            warn!(
                cursor = session.current_task_index,
                total = session.sub_tasks.len(),
                "Research step with no sub-task under the cursor"
            );
            return SessionUpdate::none();
        };

        match self.run_task(task).await {
            Ok(findings) => {
                info!(
                    task_id = task.id,
                    tool = %task.tool,
                    findings = findings.len(),
                    "Sub-task done"
                );
                SessionUpdate::task_done(task.id, findings)
            }
            Err(e) => {
                warn!(task_id = task.id, tool = %task.tool, error = %e, "Sub-task failed");
                SessionUpdate::task_failed(
                    task.id,
                    format!("Task {} ({}:{}): {}", task.id, task.tool, task.query, e),
                )
            }
        }
    }

    async fn run_task(&self, task: &SubTask) -> std::result::Result<Vec<Finding>, ToolError> {
        let tool = self.registry.get(&task.tool)?;
        let findings = tool.search(&task.query).await?;
        Ok(self.enrich(tool.source_type(), findings).await)
    }

    /// Replace the snippets of the first [`ENRICH_LIMIT`] findings with page
    /// text. Fetch failures keep the original snippet.
    async fn enrich(&self, source_type: SourceType, findings: Vec<Finding>) -> Vec<Finding> {
        if !source_type.is_enrichable() {
            return findings;
        }

        let mut enriched = Vec::with_capacity(findings.len());
        for (i, finding) in findings.into_iter().enumerate() {
            if i >= ENRICH_LIMIT {
                enriched.push(finding);
                continue;
            }
            match self.reader.read(&finding.url).await {
                Ok(Some(text)) => enriched.push(finding.enriched(&text)),
                Ok(None) => {
                    debug!(url = %finding.url, "No extractable page text");
                    enriched.push(finding);
                }
                Err(e) => {
                    debug!(url = %finding.url, error = %e, "Enrichment fetch failed");
                    enriched.push(finding);
                }
            }
        }
        enriched
    }

    async fn synthesize(&self, session: &Session) -> SessionUpdate {
        match self
            .synthesizer
            .synthesize(&session.original_query, &session.all_findings, &session.errors)
            .await
        {
            Ok(report) => {
                info!(chars = report.len(), "Report synthesized");
                SessionUpdate::report(report)
            }
            Err(e) => {
                let message = match e {
                    AppError::Synthesis(msg) => msg,
                    other => other.to_string(),
                };
                warn!(error = %message, "Synthesis failed");
                SessionUpdate::error(format!("Synthesis failed: {}", message))
            }
        }
    }

    async fn persist_memory(&self, session: &Session) -> SessionUpdate {
        if session.final_report.is_empty() {
            info!("No report produced, skipping memory persistence");
            return SessionUpdate::none();
        }

        match self
            .memory
            .add(
                &session.original_query,
                session.all_findings.len(),
                &session.final_report,
            )
            .await
        {
            Ok(()) => SessionUpdate::none(),
            Err(e) => {
                warn!(error = %e, "Memory persistence failed");
                SessionUpdate::error(format!("Memory persistence failed: {}", e))
            }
        }
    }
}
