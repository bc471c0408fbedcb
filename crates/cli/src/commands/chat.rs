//! `aerwatch chat` — Briefing plus interactive Q&A session.
//!
//! Reads user turns from stdin; `quit`, `exit`, or EOF ends the session.

use aerwatch_assistant::{BriefingGenerator, ChatSession, InMemoryStore};
use aerwatch_assistant::prompts::ASSISTANT_ROLE;
use aerwatch_config::AppConfig;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    if !config.has_api_keys() {
        eprintln!();
        eprintln!("  ERROR: Missing API key(s)!");
        eprintln!();
        eprintln!("  Set these environment variables:");
        eprintln!("    OPEN_WEATHER_API_KEY  (OpenWeather air pollution data)");
        eprintln!("    OPENAI_API_KEY        (chat model)");
        eprintln!();
        eprintln!("  Or add them to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("Missing API keys. See above for setup instructions.".into());
    }

    let summary = super::classify_current(&config).await?;

    let provider = Arc::new(aerwatch_providers::chat_provider_from_config(&config)?);
    let generator = BriefingGenerator::new(
        provider.clone(),
        config.llm.clone(),
        config.location.clone(),
    );

    eprint!("  Generating bulletin...");
    let bulletin = generator.generate(&summary).await?;
    eprint!("\r                        \r");

    println!();
    println!("{}", bulletin.greeting);
    println!();
    println!("{}", bulletin.recommendations);
    println!();
    println!("  Ask about the current air quality.");
    println!("  Type 'quit' or Ctrl+D to end the session.");
    println!();

    let mut session = ChatSession::new(
        provider,
        InMemoryStore::new(),
        &config.llm.model,
        config.llm.chat_temperature,
        config.llm.max_tokens,
    );
    session.begin(ASSISTANT_ROLE, &bulletin.combined());

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    print!("  You > ");
    use std::io::Write;
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            print!("  You > ");
            std::io::stdout().flush()?;
            continue;
        }

        if matches!(line.as_str(), "quit" | "exit" | "/quit" | "/exit") {
            break;
        }

        match session.user_turn(&line).await {
            Ok(reply) => {
                println!();
                for reply_line in reply.lines() {
                    println!("  Assistant > {reply_line}");
                }
                println!();
            }
            Err(e) => {
                eprintln!("  [Error] {e}");
                println!();
            }
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    session.end();
    println!();
    println!("  Stay safe out there! 🌬️");
    println!();

    Ok(())
}
