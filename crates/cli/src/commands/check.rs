//! `aerwatch check` — Classify the current observation without the LLM.

use aerwatch_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let summary = super::classify_current(&config).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
