//! Prompt text for the planning and synthesis model calls.

use crate::types::Finding;

/// Tool names the planner may choose from, with what each is good for.
pub const TOOL_GUIDE: &[(&str, &str)] = &[
    (
        "arxiv",
        "Academic papers on arXiv. Best for scientific concepts, algorithms, methods and benchmarks.",
    ),
    (
        "web",
        "General web search via DuckDuckGo. Best for tutorials, blog posts, documentation, news and comparisons.",
    ),
    (
        "github",
        "GitHub repositories, most-starred first. Best for reference implementations and libraries.",
    ),
    (
        "wikipedia",
        "Wikipedia articles. Best for definitions, background and history.",
    ),
    (
        "semantic_scholar",
        "Semantic Scholar papers with citation counts. Best for influential or highly cited work.",
    ),
    (
        "huggingface",
        "Hugging Face Hub models, most-downloaded first. Best for pretrained models and checkpoints.",
    ),
    (
        "youtube",
        "YouTube videos. Best for talks, lectures and walkthroughs.",
    ),
];

pub fn planner_system_prompt(max_sub_tasks: usize) -> String {
    let tools = TOOL_GUIDE
        .iter()
        .map(|(name, description)| format!("- \"{}\": {}", name, description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a research planning assistant. Break the research question into 2-{max} focused sub-tasks, each answerable by searching one source.

Available tools:
{tools}

Respond with JSON only, no markdown fences:
{{
  "reasoning": "one or two sentences on how you split the question",
  "sub_tasks": [
    {{"query": "specific search query", "tool": "one of the tool names above"}}
  ]
}}

Rules:
- Every query must be specific and make sense on its own.
- Pick the tool whose source best fits each query.
- Order sub-tasks from foundational to specific.
- Never return more than {max} sub-tasks."#,
        max = max_sub_tasks,
        tools = tools,
    )
}

pub fn planner_user_prompt(query: &str, past_context: &str) -> String {
    if past_context.is_empty() {
        format!("Research question: {}", query)
    } else {
        format!(
            "Past research context (from previous sessions):\n{}\n\nResearch question: {}",
            past_context, query
        )
    }
}

pub const SYNTHESIZER_SYSTEM_PROMPT: &str = r#"You are a research synthesis assistant. Combine the research findings into a well-structured, cited report.

Rules:
1. Use only the provided findings. Do not add facts the sources do not contain.
2. Cite sources as [N], where N is the finding number.
3. Organise the report into Summary, Key Findings, Detailed Analysis and References sections.
4. When findings disagree, say so and cite both.
5. When searches failed (see errors), acknowledge the gaps in coverage. When there are no findings at all, say plainly that no findings were retrieved.
6. Write clear, direct prose.
7. The References section lists every cited source with its full title and URL.

Output format: Markdown."#;

pub fn synthesizer_user_prompt(query: &str, findings: &[Finding], errors: &[String]) -> String {
    format!(
        "Original question: {}\n\nResearch findings:\n{}\n\nSearch errors (if any):\n{}\n\nWrite a comprehensive research report with citations.",
        query,
        format_findings(findings),
        format_errors(errors)
    )
}

/// Render findings as a 1-based numbered list for citation.
pub fn format_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "No findings were retrieved.".to_string();
    }

    findings
        .iter()
        .enumerate()
        .map(|(i, f)| {
            format!(
                "[{}] ({}) {}\n    URL: {}\n    Excerpt: {}\n",
                i + 1,
                f.source_type,
                f.title,
                f.url,
                f.snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        "None".to_string()
    } else {
        errors.join("\n")
    }
}
