//! The summarizer: reduce a per-pollutant result set into one overall
//! assessment.
//!
//! Pure and stateless — the same result set always yields the same summary,
//! which is the key testable property of the pipeline.

use crate::aggregate::ResultSet;
use crate::error::ClassifyError;
use crate::observation::PollutantId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The overall assessment derived from one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Epoch seconds, carried over from the result set.
    pub timestamp: i64,

    /// Level name of the worst pollutant. On a tie, the name comes from the
    /// first pollutant (result-set order) attaining the maximum index.
    pub overall_qualitative_name: String,

    /// The maximum severity index across all pollutants.
    pub overall_severity_index: u8,

    /// Severity index per pollutant, in result-set order.
    pub pollutant_indices: Vec<(PollutantId, u8)>,

    /// Unique non-empty recommendations, first occurrence wins, in
    /// result-set order.
    pub recommendations: Vec<String>,
}

/// Reduce `set` to a [`Summary`].
///
/// The tie-break for the overall name is deliberate and observable: strict
/// `>` while scanning in order means the first pollutant attaining the
/// maximum severity supplies the name. An empty result set cannot be
/// summarized and is an error, not an empty summary.
pub fn summarize(set: &ResultSet) -> Result<Summary, ClassifyError> {
    if set.is_empty() {
        return Err(ClassifyError::EmptyResultSet {
            timestamp: set.timestamp,
        });
    }

    // Seed from the first result so the strict `>` below never has to
    // compare against a sentinel.
    let mut overall_index = set.results[0].severity_index;
    let mut overall_name = set.results[0].qualitative_name.clone();
    let mut pollutant_indices = Vec::with_capacity(set.results.len());
    let mut recommendations: Vec<String> = Vec::new();

    for result in &set.results {
        pollutant_indices.push((result.pollutant.clone(), result.severity_index));

        if result.severity_index > overall_index {
            overall_index = result.severity_index;
            overall_name = result.qualitative_name.clone();
        }

        if let Some(rec) = &result.recommendation {
            let rec = rec.trim();
            if !rec.is_empty() && !recommendations.iter().any(|r| r == rec) {
                recommendations.push(rec.to_string());
            }
        }
    }

    debug!(
        timestamp = set.timestamp,
        overall = %overall_name,
        index = overall_index,
        recommendations = recommendations.len(),
        "Summarized result set"
    );

    Ok(Summary {
        timestamp: set.timestamp,
        overall_qualitative_name: overall_name,
        overall_severity_index: overall_index,
        pollutant_indices,
        recommendations,
    })
}
