//! The reading aggregator: classify every tracked pollutant in one
//! observation.
//!
//! Which pollutants are tracked, and how the provider's field names map to
//! internal ids, is configuration — not hard-coded. The mapping's insertion
//! order is preserved into the [`ResultSet`] so that downstream
//! recommendation ordering is deterministic.

use crate::error::{ClassifyError, ThresholdError};
use crate::observation::{Observation, PollutantId};
use crate::thresholds::ThresholdTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordered mapping from provider field names to internal pollutant ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantMapping {
    entries: Vec<(String, PollutantId)>,
}

impl PollutantMapping {
    pub fn new(entries: Vec<(String, PollutantId)>) -> Self {
        Self { entries }
    }

    /// `(provider field, internal id)` pairs in insertion order.
    pub fn entries(&self) -> &[(String, PollutantId)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Verify every mapped pollutant has bands in the table.
    ///
    /// Run once at startup so a typo in the mapping fails fast instead of
    /// surfacing as an unclassifiable reading on the first fetch.
    pub fn validate_against(&self, table: &ThresholdTable) -> Result<(), ThresholdError> {
        for (_, id) in &self.entries {
            if !table.covers(id) {
                return Err(ThresholdError::UnknownPollutant(id.to_string()));
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, PollutantId)> for PollutantMapping {
    fn from_iter<T: IntoIterator<Item = (String, PollutantId)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The classification outcome for one pollutant in one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantResult {
    pub pollutant: PollutantId,
    pub qualitative_name: String,
    pub severity_index: u8,
    pub recommendation: Option<String>,
}

/// All per-pollutant results for one observation, in mapping order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Epoch seconds, carried over from the observation.
    pub timestamp: i64,

    /// One result per tracked pollutant, in mapping insertion order.
    pub results: Vec<PollutantResult>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Classify every tracked pollutant in `observation` against `table`.
///
/// A pollutant listed in the mapping but absent from the observation is a
/// [`ClassifyError::MissingPollutant`]: a partial observation must not
/// silently produce a misleadingly-complete summary.
pub fn aggregate(
    observation: &Observation,
    mapping: &PollutantMapping,
    table: &ThresholdTable,
) -> Result<ResultSet, ClassifyError> {
    let mut results = Vec::with_capacity(mapping.len());

    for (field, pollutant) in mapping.entries() {
        let value = observation.concentration(field).ok_or_else(|| {
            ClassifyError::MissingPollutant {
                pollutant: pollutant.to_string(),
                timestamp: observation.timestamp,
            }
        })?;

        let band = table.lookup(pollutant, value)?;
        results.push(PollutantResult {
            pollutant: pollutant.clone(),
            qualitative_name: band.qualitative_name.clone(),
            severity_index: band.severity_index,
            recommendation: band.recommendation.clone(),
        });
    }

    debug!(
        timestamp = observation.timestamp,
        pollutants = results.len(),
        "Classified observation"
    );

    Ok(ResultSet {
        timestamp: observation.timestamp,
        results,
    })
}
