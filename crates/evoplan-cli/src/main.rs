//! evoplan CLI - self-evolving planner over a local LLM
//!
//! Usage:
//!   evoplan "Create me a CRM for a bakery"             Three-pass plan
//!   evoplan "..." --mode single-pass                   Draft only
//!   evoplan "Create me a website todo app"             Website mode (auto)
//!   evoplan "..." --website --preview-out page.html    Save extracted HTML
//!
//! Environment defaults (read once at startup): OLLAMA_API_BASE,
//! OLLAMA_MODEL. Flags override them for the run.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use evoplan_client::{CompletionApi, CompletionClient};
use evoplan_core::{Backend, EnvDefaults, GenerationConfig, Mode, RunOutcome, DEFAULT_TIMEOUT_SECS};
use evoplan_orchestrator::{extract_html, prompt, Orchestrator};

#[derive(Parser)]
#[command(name = "evoplan")]
#[command(version, about = "Self-evolving planning pipeline over local LLM backends")]
struct Cli {
    /// The goal to plan for (interpolated verbatim into the prompts)
    goal: String,

    /// Orchestration mode
    #[arg(short, long, value_enum, default_value = "self-evolving")]
    mode: CliMode,

    /// Inference server base URL (default: $OLLAMA_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Model identifier (default: $OLLAMA_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Backend wire shape
    #[arg(long, value_enum, default_value = "native")]
    backend: CliBackend,

    /// Sampling temperature, range [0.0, 1.5]
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Completion length cap, range [128, 8192]
    #[arg(long, default_value_t = 1000)]
    max_tokens: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Force website-generation mode (otherwise detected from goal keywords)
    #[arg(long)]
    website: bool,

    /// Write the extracted HTML block to this file for browser preview
    #[arg(long, value_name = "FILE")]
    preview_out: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Orchestration mode as a clap value
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    SelfEvolving,
    SinglePass,
}

impl From<CliMode> for Mode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::SelfEvolving => Mode::SelfEvolving,
            CliMode::SinglePass => Mode::SinglePass,
        }
    }
}

/// Backend wire shape as a clap value
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliBackend {
    Native,
    Chat,
}

impl From<CliBackend> for Backend {
    fn from(backend: CliBackend) -> Self {
        match backend {
            CliBackend::Native => Backend::NativeCompletion,
            CliBackend::Chat => Backend::ChatCompletion,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Environment defaults are read once here; the run configuration below
    // is immutable from this point on.
    let defaults = EnvDefaults::from_env();
    let config = GenerationConfig::new(
        cli.api_base.clone().unwrap_or(defaults.api_base),
        cli.model.clone().unwrap_or(defaults.model),
    )
    .with_backend(cli.backend.into())
    .with_temperature(cli.temperature)
    .with_max_tokens(cli.max_tokens)
    .with_timeout(Duration::from_secs(cli.timeout_secs));

    info!(
        "Using {} via {} backend at {}",
        config.model, config.backend, config.endpoint_base
    );

    let client =
        CompletionClient::new(config).context("failed to create completion client")?;
    let orchestrator = Orchestrator::new(client);

    if cli.website || prompt::wants_website(&cli.goal) {
        run_website(&orchestrator, &cli).await
    } else {
        run_plan(&orchestrator, &cli).await
    }
}

/// Plan modes: print the artifacts, then a preview of the primary output
async fn run_plan<C: CompletionApi>(orchestrator: &Orchestrator<C>, cli: &Cli) -> Result<()> {
    let outcome = orchestrator
        .run(&cli.goal, cli.mode.into())
        .await
        .context("run failed")?;

    match &outcome {
        RunOutcome::SelfEvolving(artifacts) => {
            println!("=== Final Plan ===\n");
            println!("{}\n", artifacts.final_plan.text);
            println!("=== Draft ===\n");
            println!("{}\n", artifacts.draft.text);
            println!("=== Critique ===\n");
            println!("{}\n", artifacts.critique.text);
        }
        RunOutcome::SinglePass(result) => {
            println!("=== Output ===\n");
            println!("{}\n", result.text);
        }
    }

    handle_preview(outcome.primary_text(), cli.preview_out.as_deref())
}

/// Website mode: print raw output, then extract the HTML block
async fn run_website<C: CompletionApi>(orchestrator: &Orchestrator<C>, cli: &Cli) -> Result<()> {
    let result = orchestrator
        .generate_website(&cli.goal)
        .await
        .context("website generation failed")?;

    println!("=== Raw HTML Output ===\n");
    println!("{}\n", result.text);

    handle_preview(&result.text, cli.preview_out.as_deref())
}

/// Extract a preview block and optionally persist it
fn handle_preview(text: &str, preview_out: Option<&Path>) -> Result<()> {
    match extract_html(text) {
        Some(html) => {
            if let Some(path) = preview_out {
                write_preview(path, &html)?;
                info!("Preview written to {}", path.display());
            } else {
                info!(
                    "HTML block detected ({} chars); pass --preview-out to save it",
                    html.len()
                );
            }
        }
        None => {
            if preview_out.is_some() {
                // Mirrors the original UI hint when extraction comes up empty
                eprintln!("No HTML block detected. Try again or lower temperature.");
            }
        }
    }
    Ok(())
}

/// Write extracted HTML to disk for browser preview
fn write_preview(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html)
        .with_context(|| format!("failed to write preview to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_mode_maps_to_core_mode() {
        assert_eq!(Mode::from(CliMode::SelfEvolving), Mode::SelfEvolving);
        assert_eq!(Mode::from(CliMode::SinglePass), Mode::SinglePass);
        assert_eq!(Backend::from(CliBackend::Chat), Backend::ChatCompletion);
    }

    #[test]
    fn test_write_preview_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.html");
        write_preview(&path, "<p>hi</p>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_handle_preview_without_block_is_ok() {
        assert!(handle_preview("no fences", None).is_ok());
    }
}
