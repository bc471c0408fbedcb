//! PollutionSource trait — the abstraction over upstream measurement
//! providers.
//!
//! The core consumes parsed [`Observation`]s only; network errors, malformed
//! payloads, and any retry policy belong to the adapter behind this trait.

use crate::error::ProviderError;
use crate::observation::Observation;
use async_trait::async_trait;

/// An upstream source of air-pollution observations for a fixed location.
#[async_trait]
pub trait PollutionSource: Send + Sync {
    /// A human-readable name for this source (e.g., "openweather").
    fn name(&self) -> &str;

    /// Fetch the current observation.
    async fn current(&self) -> std::result::Result<Observation, ProviderError>;

    /// Health check — can we reach the source?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedSource;

    #[async_trait]
    impl PollutionSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn current(&self) -> Result<Observation, ProviderError> {
            Ok(Observation::new(
                1_700_000_000,
                HashMap::from([("co".to_string(), 200.0)]),
            ))
        }
    }

    #[tokio::test]
    async fn trait_object_fetch() {
        let source: Box<dyn PollutionSource> = Box::new(FixedSource);
        let obs = source.current().await.unwrap();
        assert_eq!(obs.timestamp, 1_700_000_000);
        assert!(source.health_check().await.unwrap());
    }
}
