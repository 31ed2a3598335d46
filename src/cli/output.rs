//! Colored output helpers for CLI
//!
//! Status lines go to stderr so that the report, the only thing written to
//! stdout, can be piped or redirected on its own.

use crate::research::ResearchOutcome;
use crate::types::TaskStatus;
use owo_colors::OwoColorize;
use seeker_memory::MemoryHit;
use std::time::Duration;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the Seeker banner
    pub fn banner(&self) {
        if self.colored {
            eprintln!(
                "\n   {} {}\n",
                "seeker".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            eprintln!("\n   seeker v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✓".green().bold(), message.green());
        } else {
            eprintln!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "•".blue(), message);
        } else {
            eprintln!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            eprintln!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            eprintln!("\n  {}", title.bright_white().bold().underline());
        } else {
            eprintln!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            eprintln!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            eprintln!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            eprintln!("    {} {}", "•".blue(), item);
        } else {
            eprintln!("    - {}", item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            eprintln!("\n  {} {}", "tip:".dimmed(), message.dimmed().italic());
        } else {
            eprintln!("\n  [TIP] {}", message);
        }
    }

    /// Write the report itself to stdout, undecorated.
    pub fn report(&self, report: &str) {
        println!("{}", report);
    }

    /// Summarise a finished run: sub-task table, timing and every error.
    pub fn run_summary(&self, outcome: &ResearchOutcome, elapsed: Duration) {
        self.header("Sub-tasks");
        for task in outcome.sub_tasks() {
            let line = format!(
                "[{}] {:<16} {} ({} findings)",
                task.id,
                task.tool,
                task.query,
                task.findings.len()
            );
            match task.status {
                TaskStatus::Done => self.success(&line),
                TaskStatus::Failed => self.error(&line),
                TaskStatus::Pending => self.info(&line),
            }
        }

        self.kv("findings", &outcome.findings().len().to_string());
        self.kv("elapsed", &format!("{:.1}s", elapsed.as_secs_f64()));

        if !outcome.errors.is_empty() {
            self.header(&format!("Errors ({})", outcome.errors.len()));
            for error in &outcome.errors {
                self.list_item(error);
            }
        }
    }

    /// Print memory search hits, best first.
    pub fn memory_hits(&self, hits: &[MemoryHit]) {
        if hits.is_empty() {
            self.info("No related past sessions");
            return;
        }
        for hit in hits {
            if self.colored {
                eprintln!(
                    "  {} {}",
                    format!("{:.3}", hit.similarity).bright_cyan(),
                    hit.query.bright_white().bold()
                );
            } else {
                eprintln!("  {:.3} {}", hit.similarity, hit.query);
            }
            eprintln!(
                "        {}",
                crate::types::truncate_chars(&hit.report_summary, 160)
            );
        }
    }
}
