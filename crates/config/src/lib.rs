//! Configuration loading, validation, and management for Aerwatch.
//!
//! Loads configuration from `~/.aerwatch/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use aerwatch_core::{PollutantId, PollutantMapping};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.aerwatch/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenWeather API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_api_key: Option<String>,

    /// LLM provider API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_api_key: Option<String>,

    /// The fixed geographic point observations are fetched for
    #[serde(default)]
    pub location: LocationConfig,

    /// Path to the threshold table CSV
    #[serde(default = "default_thresholds_path")]
    pub thresholds_path: PathBuf,

    /// Tracked pollutants: provider field name → internal id, in order.
    /// A TOML array, so insertion order is preserved — it determines
    /// recommendation ordering downstream.
    #[serde(default = "default_pollutants")]
    pub pollutants: Vec<PollutantEntry>,

    /// Chat model configuration
    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_thresholds_path() -> PathBuf {
    AppConfig::config_dir().join("thresholds.csv")
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("weather_api_key", &redact(&self.weather_api_key))
            .field("llm_api_key", &redact(&self.llm_api_key))
            .field("location", &self.location)
            .field("thresholds_path", &self.thresholds_path)
            .field("pollutants", &self.pollutants)
            .field("llm", &self.llm)
            .finish()
    }
}

/// The monitored location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Display name used in greetings
    #[serde(default = "default_location_name")]
    pub name: String,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

fn default_location_name() -> String {
    "Koh Phangan".into()
}
fn default_latitude() -> f64 {
    9.706497174
}
fn default_longitude() -> f64 {
    99.985496058
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

/// One tracked pollutant: the provider's field name and our internal id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantEntry {
    /// Field name in the provider payload (e.g. "pm2_5")
    pub field: String,

    /// Internal pollutant id, matching the threshold table (e.g. "PM2.5")
    pub id: String,
}

fn default_pollutants() -> Vec<PollutantEntry> {
    [
        ("co", "CO"),
        ("no2", "NO2"),
        ("o3", "O3"),
        ("so2", "SO2"),
        ("pm2_5", "PM2.5"),
        ("pm10", "PM10"),
    ]
    .into_iter()
    .map(|(field, id)| PollutantEntry {
        field: field.into(),
        id: id.into(),
    })
    .collect()
}

/// Chat model configuration.
///
/// The three temperatures mirror the assistant's three uses of the model:
/// a playful greeting, a deterministic recommendations digest, and the
/// near-deterministic Q&A session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_greeting_temperature")]
    pub greeting_temperature: f32,

    #[serde(default = "default_recommendations_temperature")]
    pub recommendations_temperature: f32,

    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_provider_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o".into()
}
fn default_greeting_temperature() -> f32 {
    1.0
}
fn default_recommendations_temperature() -> f32 {
    0.0
}
fn default_chat_temperature() -> f32 {
    0.1
}
fn default_max_tokens() -> u32 {
    1024
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            model: default_model(),
            greeting_temperature: default_greeting_temperature(),
            recommendations_temperature: default_recommendations_temperature(),
            chat_temperature: default_chat_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.aerwatch/config.toml).
    ///
    /// Also checks environment variables for API keys:
    /// - `AERWATCH_WEATHER_API_KEY`, then `OPEN_WEATHER_API_KEY`
    /// - `AERWATCH_LLM_API_KEY`, then `OPENAI_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.weather_api_key.is_none() {
            config.weather_api_key = std::env::var("AERWATCH_WEATHER_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPEN_WEATHER_API_KEY").ok());
        }
        if config.llm_api_key.is_none() {
            config.llm_api_key = std::env::var("AERWATCH_LLM_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        // Allow env var to override the chat model
        if let Ok(model) = std::env::var("AERWATCH_MODEL") {
            config.llm.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".aerwatch")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            return Err(ConfigError::ValidationError(
                "location.latitude must be between -90 and 90".into(),
            ));
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            return Err(ConfigError::ValidationError(
                "location.longitude must be between -180 and 180".into(),
            ));
        }

        if self.pollutants.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one tracked pollutant is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for entry in &self.pollutants {
            if !seen.insert(entry.field.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate pollutant field '{}'",
                    entry.field
                )));
            }
        }

        for (label, t) in [
            ("greeting_temperature", self.llm.greeting_temperature),
            (
                "recommendations_temperature",
                self.llm.recommendations_temperature,
            ),
            ("chat_temperature", self.llm.chat_temperature),
        ] {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::ValidationError(format!(
                    "llm.{label} must be between 0.0 and 2.0"
                )));
            }
        }

        Ok(())
    }

    /// The tracked-pollutant mapping in configuration order.
    pub fn pollutant_mapping(&self) -> PollutantMapping {
        self.pollutants
            .iter()
            .map(|e| (e.field.clone(), PollutantId::new(&e.id)))
            .collect()
    }

    /// Check whether both API keys are available.
    pub fn has_api_keys(&self) -> bool {
        self.weather_api_key.is_some() && self.llm_api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            llm_api_key: None,
            location: LocationConfig::default(),
            thresholds_path: default_thresholds_path(),
            pollutants: default_pollutants(),
            llm: LlmConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for aerwatch_core::Error {
    fn from(err: ConfigError) -> Self {
        aerwatch_core::Error::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.location.name, "Koh Phangan");
        assert_eq!(config.pollutants.len(), 6);
        assert!((config.llm.recommendations_temperature - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.location.name, config.location.name);
        assert_eq!(parsed.pollutants, config.pollutants);
    }

    #[test]
    fn pollutant_order_preserved_from_toml_array() {
        let toml_str = r#"
[[pollutants]]
field = "pm10"
id = "PM10"

[[pollutants]]
field = "co"
id = "CO"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        let mapping = config.pollutant_mapping();
        assert_eq!(mapping.entries()[0].0, "pm10");
        assert_eq!(mapping.entries()[1].0, "co");
    }

    #[test]
    fn invalid_latitude_rejected() {
        let config = AppConfig {
            location: LocationConfig {
                latitude: 95.0,
                ..LocationConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_pollutant_list_rejected() {
        let config = AppConfig {
            pollutants: vec![],
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn duplicate_pollutant_field_rejected() {
        let config = AppConfig {
            pollutants: vec![
                PollutantEntry {
                    field: "co".into(),
                    id: "CO".into(),
                },
                PollutantEntry {
                    field: "co".into(),
                    id: "CO2".into(),
                },
            ],
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let config = AppConfig {
            llm: LlmConfig {
                chat_temperature: 5.0,
                ..LlmConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().pollutants.len(), 6);
    }

    #[test]
    fn config_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
weather_api_key = "ow-test"

[location]
name = "Bangkok"
latitude = 13.7563
longitude = 100.5018
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.location.name, "Bangkok");
        assert_eq!(config.weather_api_key.as_deref(), Some("ow-test"));
        // Debug output must not leak the key
        assert!(!format!("{config:?}").contains("ow-test"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("Koh Phangan"));
        assert!(toml_str.contains("pm2_5"));
    }
}
