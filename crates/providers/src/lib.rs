//! External data provider adapters for Aerwatch.
//!
//! Implements the core's [`PollutionSource`] and
//! [`ChatProvider`](aerwatch_core::ChatProvider) traits against real
//! services: the OpenWeather Air Pollution API and OpenAI-compatible chat
//! endpoints.

pub mod openai_compat;
pub mod openweather;

pub use openai_compat::OpenAiCompatProvider;
pub use openweather::OpenWeatherSource;

use aerwatch_config::AppConfig;
use aerwatch_core::error::ProviderError;
use aerwatch_core::source::PollutionSource;

/// Build the pollution source from configuration.
pub fn pollution_source_from_config(
    config: &AppConfig,
) -> Result<OpenWeatherSource, ProviderError> {
    let api_key = config.weather_api_key.as_deref().ok_or_else(|| {
        ProviderError::NotConfigured("No OpenWeather API key configured".into())
    })?;

    Ok(OpenWeatherSource::new(
        api_key,
        config.location.latitude,
        config.location.longitude,
    ))
}

/// Build the chat provider from configuration.
pub fn chat_provider_from_config(
    config: &AppConfig,
) -> Result<OpenAiCompatProvider, ProviderError> {
    let api_key = config
        .llm_api_key
        .as_deref()
        .ok_or_else(|| ProviderError::NotConfigured("No LLM API key configured".into()))?;

    Ok(OpenAiCompatProvider::new(
        "openai",
        &config.llm.provider_url,
        api_key,
    ))
}

/// Convenience: the configured source as a trait object.
pub fn boxed_pollution_source(
    config: &AppConfig,
) -> Result<Box<dyn PollutionSource>, ProviderError> {
    Ok(Box::new(pollution_source_from_config(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_are_not_configured_errors() {
        let config = AppConfig::default();
        assert!(matches!(
            pollution_source_from_config(&config),
            Err(ProviderError::NotConfigured(_))
        ));
        assert!(matches!(
            chat_provider_from_config(&config),
            Err(ProviderError::NotConfigured(_))
        ));
    }

    #[test]
    fn configured_keys_build_providers() {
        let config = AppConfig {
            weather_api_key: Some("ow".into()),
            llm_api_key: Some("sk".into()),
            ..AppConfig::default()
        };
        assert!(pollution_source_from_config(&config).is_ok());
        let chat = chat_provider_from_config(&config).unwrap();
        assert_eq!(
            aerwatch_core::ChatProvider::name(&chat),
            "openai"
        );
    }
}
