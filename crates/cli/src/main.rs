//! Aerwatch CLI — the main entry point.
//!
//! Commands:
//! - `onboard`  — Initialize config & starter threshold table
//! - `check`    — Fetch and classify the current observation (no LLM)
//! - `briefing` — Full pipeline: fetch, classify, generate bulletin
//! - `chat`     — Briefing plus interactive Q&A session
//! - `doctor`   — Diagnose configuration and provider health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "aerwatch",
    about = "Aerwatch — air-quality classification and briefing assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and a starter threshold table
    Onboard,

    /// Fetch the current observation and print the classified summary
    Check,

    /// Generate and print the natural-language bulletin
    Briefing,

    /// Generate a bulletin, then answer follow-up questions interactively
    Chat,

    /// Diagnose configuration and provider health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Check => commands::check::run().await?,
        Commands::Briefing => commands::briefing::run().await?,
        Commands::Chat => commands::chat::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
