//! Seeker CLI Entry Point
//!
//! - `seeker research <question>` - Run the research pipeline and print the report
//! - `seeker memory search <text>` - Find related past sessions
//! - `seeker memory stats` - Show memory file details
//! - `seeker serve` - Start the HTTP API

use anyhow::Context;
use seeker::{
    api::routes,
    cli::{output::Output, Cli, Commands, MemoryCommands},
    memory::open_store,
    AppState, ResearchOrchestrator, Settings,
};
use seeker_memory::SearchOptions;
use std::{process::ExitCode, sync::Arc, time::Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = init_tracing(cli.verbose, cli.log_json) {
        output.error(&format!("{:#}", e));
        return ExitCode::FAILURE;
    }

    match run(cli, &output).await {
        Ok(code) => code,
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool, json: bool) -> anyhow::Result<()> {
    let default_level = if verbose {
        "seeker=debug,seeker_memory=debug"
    } else {
        "seeker=info,seeker_memory=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<ExitCode> {
    let mut settings = Settings::from_env().context("Failed to load settings")?;
    if let Some(path) = cli.memory_path {
        settings.memory.path = path;
    }

    match cli.command {
        Commands::Research { query } => research(&settings, &query.join(" "), output).await,
        Commands::Memory(command) => memory(&settings, command, output).await,
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            serve(&settings).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn research(settings: &Settings, query: &str, output: &Output) -> anyhow::Result<ExitCode> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("Query must not be empty");
    }

    let memory = open_store(settings)
        .await
        .context("Failed to open research memory")?;
    let memory_error = memory.load_error().map(str::to_string);
    let orchestrator = ResearchOrchestrator::from_settings(settings, memory)?;

    output.banner();
    if let Some(reason) = memory_error {
        output.warning(&format!("Research memory disabled for this run: {}", reason));
    }
    output.info(&format!("Researching: {}", query));

    let start = Instant::now();
    let outcome = orchestrator.run(query).await?;
    output.run_summary(&outcome, start.elapsed());

    if !outcome.has_report() {
        output.error("No report was produced");
        output.hint("Run with --verbose to see each step");
        return Ok(ExitCode::FAILURE);
    }

    output.report(&outcome.final_report);
    Ok(ExitCode::SUCCESS)
}

async fn memory(
    settings: &Settings,
    command: MemoryCommands,
    output: &Output,
) -> anyhow::Result<ExitCode> {
    let store = open_store(settings)
        .await
        .context("Failed to open research memory")?;

    match command {
        MemoryCommands::Search {
            query,
            top_k,
            threshold,
        } => {
            if !(0.0..=1.0).contains(&threshold) {
                anyhow::bail!("--threshold must be between 0.0 and 1.0");
            }
            let options = SearchOptions::default()
                .with_top_k(top_k)
                .with_threshold(threshold);
            let hits = store.search_with(&query, options).await?;
            output.memory_hits(&hits);
        }
        MemoryCommands::Stats => {
            output.header("Research memory");
            output.kv("Path", &store.path().display().to_string());
            output.kv("Entries", &store.len().await.to_string());
            output.kv("Embedding model", store.model_name());
            if let Some(reason) = store.load_error() {
                output.warning(&format!("Memory file could not be loaded: {}", reason));
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let memory = open_store(settings)
        .await
        .context("Failed to open research memory")?;
    let orchestrator = Arc::new(ResearchOrchestrator::from_settings(settings, memory)?);
    let app = routes::app(AppState::new(orchestrator));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Seeker listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
