//! The threshold reference table: concentration bands per pollutant.
//!
//! Loaded once at process start from a tabular source and read-only after
//! that, so it is safe to share across concurrent pipeline invocations.
//! The lookup is the classifier: first band in table order whose closed
//! interval contains the value wins.

use crate::error::{ClassifyError, ThresholdError};
use crate::observation::PollutantId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One qualitative band for one pollutant: a closed concentration interval
/// mapped to a level name, an ordinal severity index, and optional advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub pollutant: PollutantId,

    /// Inclusive lower bound (μg/m³).
    pub lower: f64,

    /// Inclusive upper bound (μg/m³).
    pub upper: f64,

    /// Level name, e.g. "Good" or "Unhealthy".
    pub qualitative_name: String,

    /// Ordinal severity; higher means worse air quality.
    pub severity_index: u8,

    /// Health recommendation for this band, if the source provides one.
    pub recommendation: Option<String>,
}

/// The process-wide threshold table.
///
/// Construction validates that, per pollutant, bands form a clean ascending
/// partition: no inverted bounds, no interior overlaps, no gaps between
/// adjacent bands, and every band carries a non-empty level name. A shared boundary (upper of one band == lower of the
/// next) is legal; values sitting exactly on it resolve to the
/// earlier-ordered band because lookup takes the first match.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    bands: HashMap<PollutantId, Vec<ThresholdBand>>,
}

impl ThresholdTable {
    /// Build a table from bands in source order, validating its shape.
    ///
    /// A malformed table (overlap, gap, inverted bounds, no bands) is a
    /// configuration error and must abort startup rather than produce
    /// deterministic-but-wrong classifications later.
    pub fn new(bands: Vec<ThresholdBand>) -> Result<Self, ThresholdError> {
        if bands.is_empty() {
            return Err(ThresholdError::Empty);
        }

        let mut grouped: HashMap<PollutantId, Vec<ThresholdBand>> = HashMap::new();
        for band in bands {
            if band.lower > band.upper {
                return Err(ThresholdError::InvertedBounds {
                    pollutant: band.pollutant.to_string(),
                    lower: band.lower,
                    upper: band.upper,
                });
            }
            if band.qualitative_name.trim().is_empty() {
                return Err(ThresholdError::UnnamedBand {
                    pollutant: band.pollutant.to_string(),
                    lower: band.lower,
                    upper: band.upper,
                });
            }
            grouped.entry(band.pollutant.clone()).or_default().push(band);
        }

        for (pollutant, bands) in &grouped {
            for pair in bands.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if b.lower < a.upper {
                    return Err(ThresholdError::Overlap {
                        pollutant: pollutant.to_string(),
                        first: a.qualitative_name.clone(),
                        second: b.qualitative_name.clone(),
                    });
                }
                if b.lower > a.upper {
                    return Err(ThresholdError::Gap {
                        pollutant: pollutant.to_string(),
                        first: a.qualitative_name.clone(),
                        upper: a.upper,
                        second: b.qualitative_name.clone(),
                        lower: b.lower,
                    });
                }
            }
        }

        Ok(Self { bands: grouped })
    }

    /// Classify one reading: the first band in table order whose closed
    /// interval contains `value`.
    ///
    /// A value outside the covered range (negative readings, sensor errors)
    /// is an [`ClassifyError::Unclassified`] — never silently clamped.
    /// Comparison uses the value's native precision; no rounding.
    pub fn lookup(
        &self,
        pollutant: &PollutantId,
        value: f64,
    ) -> Result<&ThresholdBand, ClassifyError> {
        self.bands
            .get(pollutant)
            .into_iter()
            .flatten()
            .find(|band| band.lower <= value && value <= band.upper)
            .ok_or_else(|| ClassifyError::Unclassified {
                pollutant: pollutant.to_string(),
                value,
            })
    }

    /// The set of pollutants this table covers, for config-time validation.
    pub fn pollutants(&self) -> HashSet<&PollutantId> {
        self.bands.keys().collect()
    }

    /// Whether the table has bands for the given pollutant.
    pub fn covers(&self, pollutant: &PollutantId) -> bool {
        self.bands.contains_key(pollutant)
    }

    /// Bands for one pollutant, in table order.
    pub fn bands_for(&self, pollutant: &PollutantId) -> &[ThresholdBand] {
        self.bands.get(pollutant).map(Vec::as_slice).unwrap_or(&[])
    }
}
