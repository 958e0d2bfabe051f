use anyhow::{Context, Result};
use clap::Parser;
use code_iterator::{
    config::{self, Config},
    console::ConsoleView,
    controller::{SuggestionController, View},
    highlight::{Highlighter, PlainHighlighter, SyntectHighlighter},
    suggest::HttpSuggestionClient,
};
use colored::Colorize;
use dialoguer::Confirm;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Ask the suggestion service to rework a code snippet.
#[derive(Debug, Parser)]
#[command(name = "code-iterator", version, about)]
struct Cli {
    /// File holding the code snippet; read from stdin when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Description of the change you want
    #[arg(short, long, required_unless_present = "check")]
    prompt: Option<String>,

    /// Configuration file (defaults to CONFIG_PATH, then config.yaml)
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Integrate the suggestion without asking
    #[arg(short, long)]
    yes: bool,

    /// Only check that the service is reachable
    #[arg(long)]
    check: bool,
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());
    validate_log_level(&log_level)?;

    let filter = tracing_subscriber::EnvFilter::try_new(&log_level)
        .with_context(|| format!("Invalid log filter: {}", log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logs.json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

async fn read_code(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("Failed to read code from stdin")?;
            Ok(code)
        }
    }
}

fn build_highlighter(config: &Config) -> Arc<dyn Highlighter> {
    if !std::io::stdout().is_terminal() {
        return Arc::new(PlainHighlighter);
    }

    match SyntectHighlighter::new(&config.ui.theme) {
        Ok(highlighter) => Arc::new(highlighter),
        Err(e) => {
            warn!("{}, falling back to plain output", e);
            Arc::new(PlainHighlighter)
        }
    }
}

async fn check_service(client: &HttpSuggestionClient) -> Result<()> {
    let message = client
        .welcome()
        .await
        .with_context(|| format!("Suggestion service at {} is not reachable", client.base_url()))?;
    println!("{} {}", "✓".green().bold(), message);
    Ok(())
}

async fn run(cli: Cli, config: Config) -> Result<bool> {
    let client = HttpSuggestionClient::new(&config.service)?;

    if cli.check {
        check_service(&client).await?;
        return Ok(true);
    }

    let prompt = cli.prompt.clone().unwrap_or_default();
    let code = read_code(cli.file.as_ref()).await?;

    let view = Arc::new(ConsoleView::new(code, prompt));
    let controller = SuggestionController::new(
        Arc::new(client),
        view.clone(),
        build_highlighter(&config),
        config.ui.clone(),
    );

    let outcome = controller.request_suggestion().await;
    if !outcome.is_success() {
        return Ok(false);
    }

    let integrate = cli.yes
        || (std::io::stdin().is_terminal()
            && Confirm::new()
                .with_prompt("Integrate the suggested code?")
                .default(false)
                .interact()?);

    if !integrate || !controller.integrate_suggestion() {
        return Ok(true);
    }

    let integrated = view.selected_code();
    match cli.file {
        Some(path) => {
            tokio::fs::write(&path, integrated)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote suggestion to {}", path.display());
        }
        None => print!("{}", integrated),
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging setup)
    let loaded = match &cli.config {
        Some(path) => config::load_from(path).await,
        None => config::load().await,
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!("Using suggestion service at {}", config.service.base_url);

    if !run(cli, config).await? {
        std::process::exit(1);
    }

    Ok(())
}
