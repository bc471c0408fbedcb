//! OpenWeather air-pollution source implementation.
//!
//! Fetches the current observation for a fixed lat/lon from
//! `/data/2.5/air_pollution` and flattens the first list entry's
//! `components` into an [`Observation`]. Retry policy is deliberately the
//! caller's concern.

use aerwatch_core::error::ProviderError;
use aerwatch_core::observation::Observation;
use aerwatch_core::source::PollutionSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/air_pollution";

/// The OpenWeather Air Pollution API as a [`PollutionSource`].
pub struct OpenWeatherSource {
    base_url: String,
    api_key: String,
    latitude: f64,
    longitude: f64,
    client: reqwest::Client,
}

impl OpenWeatherSource {
    /// Create a source for a fixed geographic point.
    pub fn new(api_key: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            latitude,
            longitude,
            client,
        }
    }

    /// Override the endpoint base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn request_url(&self) -> String {
        format!(
            "{}?lat={}&lon={}&appid={}",
            self.base_url, self.latitude, self.longitude, self.api_key
        )
    }
}

#[async_trait]
impl PollutionSource for OpenWeatherSource {
    fn name(&self) -> &str {
        "openweather"
    }

    async fn current(&self) -> Result<Observation, ProviderError> {
        debug!(lat = self.latitude, lon = self.longitude, "Fetching air pollution data");

        let response = self
            .client
            .get(self.request_url())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited { retry_after_secs: 60 });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid OpenWeather API key".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "OpenWeather returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let payload: AirPollutionResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedPayload(format!(
                    "Failed to parse air pollution response: {e}"
                )))?;

        parse_observation(payload)
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        let response = self
            .client
            .get(self.request_url())
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

/// Extract the first data point from the payload as an observation.
fn parse_observation(payload: AirPollutionResponse) -> Result<Observation, ProviderError> {
    let point = payload
        .list
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedPayload("Empty data list in response".into()))?;

    Ok(Observation::new(point.dt, point.components))
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    #[allow(dead_code)]
    coord: Coord,
    #[serde(default)]
    list: Vec<DataPoint>,
}

#[derive(Debug, Deserialize)]
struct Coord {
    #[allow(dead_code)]
    lat: f64,
    #[allow(dead_code)]
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct DataPoint {
    dt: i64,
    /// Pollutant concentrations keyed by API field name (co, no, no2, o3,
    /// so2, pm2_5, pm10, nh3), in μg/m³.
    components: HashMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "coord": { "lon": 99.9855, "lat": 9.7065 },
        "list": [
            {
                "main": { "aqi": 1 },
                "components": {
                    "co": 201.94, "no": 0.02, "no2": 0.77, "o3": 68.66,
                    "so2": 0.64, "pm2_5": 0.5, "pm10": 0.54, "nh3": 0.12
                },
                "dt": 1700000000
            }
        ]
    }"#;

    #[test]
    fn parse_sample_payload() {
        let payload: AirPollutionResponse = serde_json::from_str(SAMPLE).unwrap();
        let obs = parse_observation(payload).unwrap();

        assert_eq!(obs.timestamp, 1_700_000_000);
        assert_eq!(obs.concentration("co"), Some(201.94));
        assert_eq!(obs.concentration("pm2_5"), Some(0.5));
        // Untracked components are carried but harmless.
        assert_eq!(obs.concentration("nh3"), Some(0.12));
    }

    #[test]
    fn empty_list_is_malformed() {
        let payload: AirPollutionResponse =
            serde_json::from_str(r#"{ "coord": { "lat": 0.0, "lon": 0.0 }, "list": [] }"#).unwrap();
        assert!(matches!(
            parse_observation(payload),
            Err(ProviderError::MalformedPayload(_))
        ));
    }

    #[test]
    fn request_url_includes_location_and_key() {
        let source = OpenWeatherSource::new("test-key", 9.7065, 99.9855);
        let url = source.request_url();
        assert!(url.contains("lat=9.7065"));
        assert!(url.contains("lon=99.9855"));
        assert!(url.contains("appid=test-key"));
    }
}
