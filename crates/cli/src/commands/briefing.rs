//! `aerwatch briefing` — Full pipeline: fetch, classify, generate bulletin.

use aerwatch_assistant::BriefingGenerator;
use aerwatch_config::AppConfig;
use std::sync::Arc;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let summary = super::classify_current(&config).await?;

    let provider = Arc::new(aerwatch_providers::chat_provider_from_config(&config)?);
    let generator = BriefingGenerator::new(
        provider,
        config.llm.clone(),
        config.location.clone(),
    );

    eprint!("  Generating bulletin...");
    let bulletin = generator.generate(&summary).await?;
    eprint!("\r                        \r");

    println!("{}", bulletin.greeting);
    println!();
    println!("{}", bulletin.recommendations);
    Ok(())
}
