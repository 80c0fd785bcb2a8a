//! CLI entrypoint for toolcall-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolcall_application::{
    AgentProgressNotifier, LlmGateway, NoAgentProgress, RunQueryInput, RunQueryUseCase,
    UnavailableGateway,
};
use toolcall_domain::{FallbackSelector, OutputFormat};
use toolcall_infrastructure::{
    ConfigLoader, FileConfig, JsonlRunEventLogger, OpenAiConfig, OpenAiGateway,
    default_registry, http_client, tools::HTTP_TIMEOUT,
};
use toolcall_presentation::{Cli, ConsoleFormatter, OutputFormatter, ProgressReporter};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` overrides `-v`. With `--log-file`, logs go to that file
/// through a non-blocking writer; the guard must live until exit.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn build_gateway(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn LlmGateway>> {
    if cli.no_llm {
        return Ok(Arc::new(UnavailableGateway::new("disabled with --no-llm")));
    }
    let gateway = OpenAiGateway::new(OpenAiConfig::from(&config.llm))
        .context("Failed to create LLM gateway")?;
    Ok(Arc::new(gateway))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    info!("Starting toolcall-agent");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let client = http_client(HTTP_TIMEOUT).context("Failed to build HTTP client")?;
    let registry = Arc::new(
        default_registry(&config.tools, client).context("Failed to register tools")?,
    );
    let gateway = build_gateway(&cli, &config)?;

    let mut use_case = RunQueryUseCase::new(registry.clone(), gateway, config.orchestrator_params())
        .with_fallback_selector(
            FallbackSelector::new().with_default_location(config.tools.default_location.clone()),
        );

    if let Some(path) = &config.logging.run_log {
        match JsonlRunEventLogger::open(path) {
            Ok(logger) => {
                info!(path = %logger.path().display(), "Run event log enabled");
                use_case = use_case.with_run_logger(Arc::new(logger));
            }
            Err(e) => warn!(error = %e, "Run event log disabled"),
        }
    }

    if cli.info {
        println!("{}", ConsoleFormatter::format_info(&use_case.agent_info()));
        return Ok(ExitCode::SUCCESS);
    }

    if cli.list_tools {
        print!("{}", ConsoleFormatter::format_tools(&registry.list()));
        return Ok(ExitCode::SUCCESS);
    }

    let query = match &cli.query {
        Some(q) => q.clone(),
        None => bail!("A query is required. Use --list-tools or --info to inspect the agent."),
    };

    if cli.suggest {
        let suggestions = use_case.suggest_tools(&query);
        print!("{}", ConsoleFormatter::format_suggestions(&query, &suggestions));
        return Ok(ExitCode::SUCCESS);
    }

    let format = config.output.resolve_format(cli.output.map(Into::into));
    let input = RunQueryInput::new(query).with_context(cli.query_context());

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling query");
                cancel.cancel();
            }
        }
    });

    let progress: Box<dyn AgentProgressNotifier> = if cli.quiet || format == OutputFormat::Json {
        Box::new(NoAgentProgress)
    } else if cli.verbose > 0 {
        Box::new(ProgressReporter::verbose())
    } else {
        Box::new(ProgressReporter::new())
    };

    let response = use_case
        .execute_with_cancellation(input, progress.as_ref(), &cancel)
        .await;

    println!("{}", ConsoleFormatter.render(&response, format));

    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
