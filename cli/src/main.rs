//! CLI entrypoint for AI Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use council_application::{AdmissionController, RunDebateInput, RunDebateUseCase, SystemClock};
use council_domain::{OutputFormat, Question};
use council_infrastructure::{
    AttachmentLoader, ConfigLoader, FileConfig, GenerationSettings, JsonlConversationLogger,
    RoutingGateway,
};
use council_presentation::{Cli, ConsoleFormatter, ProgressMode};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in ./.env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let log_dir = cli.log_dir.as_deref().or(config.logging.dir.as_deref());
    let _log_guard = init_logging(cli.verbose, log_dir);

    info!("Starting AI Council");

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_ref()));
        return Ok(());
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    // Roster: command-line agents replace the configured council
    let agents = if cli.agents.is_empty() {
        config.to_agents()
    } else {
        cli.agents.clone()
    };

    for issue in config.check(&agents)? {
        warn!("{}", issue.message);
    }

    // === Dependency Injection ===
    let catalog = Arc::new(config.to_catalog());
    let admission = Arc::new(AdmissionController::new(&catalog, Arc::new(SystemClock)));
    let gateway = Arc::new(RoutingGateway::new(
        catalog.clone(),
        config.debate.timeout(),
        GenerationSettings {
            max_tokens: config.debate.max_tokens,
            temperature: config.debate.temperature,
        },
    )?);

    if cli.providers {
        print_providers(&admission, &gateway);
        return Ok(());
    }

    let Some(question) = cli.question.as_deref() else {
        bail!("A question is required. Run `ai-council --help` for usage.");
    };
    let question = Question::new(question)?;

    let context = load_context(&cli, &config).await?;

    let mut params = config.debate.to_params();
    if let Some(rounds) = cli.max_rounds {
        params = params.with_max_revision_rounds(rounds);
    }

    // Ctrl-C cancels the in-flight call and ends the run
    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling debate");
            interrupt.cancel();
        }
    });

    let mut use_case = RunDebateUseCase::new(gateway, admission, catalog)
        .with_params(params)
        .with_cancellation(token);

    if let Some(path) = cli.transcript.as_ref().or(config.logging.transcript.as_ref())
        && let Some(logger) = JsonlConversationLogger::new(path)
    {
        info!("Writing transcript to {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }

    let mut input = RunDebateInput::new(question, agents);
    if let Some(context) = context {
        input = input.with_context(context);
    }

    let result = {
        let mode = ProgressMode::select(cli.quiet, cli.plain, std::io::stderr().is_terminal());
        let progress = mode.notifier();
        use_case.execute_with_progress(input, progress.as_ref()).await?
    };

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Answer => ConsoleFormatter::format_answer_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{}", output);

    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// Logs go to stderr; with a log directory a daily-rotated file gets the
/// same events. The returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "ai-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Read attached files and URLs into one context block
async fn load_context(cli: &Cli, config: &FileConfig) -> Result<Option<String>> {
    if cli.files.is_empty() && cli.urls.is_empty() {
        return Ok(None);
    }

    let loader = AttachmentLoader::new(config.attachments.to_limits())?;
    let context = loader.build_context(&cli.files, &cli.urls).await;
    Ok(Some(context))
}

fn print_providers(admission: &AdmissionController, gateway: &RoutingGateway) {
    println!("Providers (fallback order):");
    for usage in admission.stats() {
        let key = if gateway.is_provider_configured(&usage.provider) {
            "API key set"
        } else {
            "no API key"
        };
        let state = if usage.available { "available" } else { "rate-limited" };
        println!("  {} [{}, {}]", usage, state, key);
    }
}
