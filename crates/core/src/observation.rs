//! Observation value objects — one timestamped snapshot of pollutant readings.
//!
//! Observations arrive from the upstream data provider already parsed; the
//! core treats them as immutable inputs to the classification pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable internal identifier for a tracked pollutant (e.g. "CO", "PM2.5").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PollutantId(pub String);

impl PollutantId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PollutantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PollutantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One snapshot of pollutant concentrations for the configured location.
///
/// Keys are the provider's own field names (e.g. `pm2_5`); translation to
/// internal [`PollutantId`]s happens in the aggregator via the configured
/// pollutant mapping. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Measurement time as Unix epoch seconds, as reported by the provider.
    pub timestamp: i64,

    /// Concentration per provider field name, in the provider's units (μg/m³).
    pub concentrations: HashMap<String, f64>,
}

impl Observation {
    pub fn new(timestamp: i64, concentrations: HashMap<String, f64>) -> Self {
        Self {
            timestamp,
            concentrations,
        }
    }

    /// Concentration for a provider field, if present in this snapshot.
    pub fn concentration(&self, field: &str) -> Option<f64> {
        self.concentrations.get(field).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pollutant_id_display() {
        let id = PollutantId::new("PM2.5");
        assert_eq!(id.to_string(), "PM2.5");
        assert_eq!(id.as_str(), "PM2.5");
    }

    #[test]
    fn observation_lookup() {
        let obs = Observation::new(1_700_000_000, HashMap::from([("co".to_string(), 201.94)]));
        assert_eq!(obs.concentration("co"), Some(201.94));
        assert_eq!(obs.concentration("pm10"), None);
    }

    #[test]
    fn observation_serialization_roundtrip() {
        let obs = Observation::new(1_700_000_000, HashMap::from([("no2".to_string(), 0.77)]));
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timestamp, 1_700_000_000);
        assert_eq!(back.concentration("no2"), Some(0.77));
    }
}
