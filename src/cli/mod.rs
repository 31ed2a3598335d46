//! CLI module for Seeker
//!
//! Provides command-line interface parsing for the seeker binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Seeker - multi-step research assistant
///
/// Plans sub-queries, searches academic, web, code, encyclopedic and video
/// sources, and writes a cited report.
#[derive(Parser, Debug)]
#[command(
    name = "seeker",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Seeker - multi-step research assistant",
    long_about = "Plans focused sub-queries, searches arXiv, the web, GitHub, Wikipedia,\n\
                  Semantic Scholar, the Hugging Face Hub and YouTube, and writes a cited\n\
                  report. Past sessions are remembered and used to seed future plans.\n\n\
                  Requires GROQ_API_KEY in the environment or a .env file.",
    after_help = "EXAMPLES:\n    \
                  seeker research \"What is LoRA?\"          # Research and print the report\n    \
                  seeker research What is LoRA > lora.md   # Save the report\n    \
                  seeker memory search \"fine-tuning\"       # Find related past sessions\n    \
                  seeker memory stats                      # Show memory file details\n    \
                  seeker serve --port 8080                 # Start the HTTP API"
)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Memory file location (overrides SEEKER_MEMORY_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub memory_path: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research a question and print a cited report
    ///
    /// The report goes to stdout; progress, the sub-task summary and any
    /// errors go to stderr. Exits non-zero when no report was produced.
    Research {
        /// The research question (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Inspect the research memory
    #[command(subcommand)]
    Memory(MemoryCommands),

    /// Serve the HTTP API
    Serve {
        /// Host address (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Memory subcommands
#[derive(Subcommand, Debug)]
pub enum MemoryCommands {
    /// Find past sessions similar to a query
    Search {
        /// Text to compare against past queries and reports
        query: String,

        /// Maximum number of hits
        #[arg(long, default_value_t = seeker_memory::DEFAULT_TOP_K)]
        top_k: usize,

        /// Minimum similarity (0.0 to 1.0)
        #[arg(long, default_value_t = seeker_memory::DEFAULT_THRESHOLD)]
        threshold: f32,
    },

    /// Show the memory file location and entry count
    Stats,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
