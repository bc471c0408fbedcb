//! CLI command implementations.

pub mod briefing;
pub mod chat;
pub mod check;
pub mod doctor;
pub mod onboard;

use aerwatch_config::AppConfig;
use aerwatch_core::{PollutantMapping, Summary, ThresholdTable};

/// Load the threshold table and pollutant mapping, cross-validated.
///
/// Shared by every command that classifies: a typo in the mapping or a
/// malformed table fails here, before any network call.
pub(crate) fn load_pipeline(
    config: &AppConfig,
) -> Result<(ThresholdTable, PollutantMapping), Box<dyn std::error::Error>> {
    let mapping = config.pollutant_mapping();
    let pollutants: Vec<_> = mapping.entries().iter().map(|(_, id)| id.clone()).collect();

    let table = aerwatch_thresholds::load_from_path(&config.thresholds_path, &pollutants)?;
    mapping.validate_against(&table)?;

    Ok((table, mapping))
}

/// Fetch the current observation and run it through the pipeline.
pub(crate) async fn classify_current(
    config: &AppConfig,
) -> Result<Summary, Box<dyn std::error::Error>> {
    let (table, mapping) = load_pipeline(config)?;

    let source = aerwatch_providers::pollution_source_from_config(config)?;
    let observation = aerwatch_core::PollutionSource::current(&source).await?;

    let result_set = aerwatch_core::aggregate(&observation, &mapping, &table)?;
    let summary = aerwatch_core::summarize(&result_set)?;
    Ok(summary)
}
