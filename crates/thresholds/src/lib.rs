//! Threshold-source loading for Aerwatch.
//!
//! The threshold table ships as a wide CSV: shared `Qualitative Name` and
//! `Index` columns, plus `<POLLUTANT> Lower`, `<POLLUTANT> Upper`, and
//! `<POLLUTANT> Recommendations` column triples per pollutant. Each row is
//! one qualitative level; reading down a pollutant's triple yields its bands
//! in ascending order.
//!
//! Loading happens once at startup. Anything wrong with the source — missing
//! file, missing columns, unparsable numbers, overlapping or gapped bands —
//! is fatal: a silently-degraded table would produce deterministic but wrong
//! classifications.

mod csv;

use aerwatch_core::{PollutantId, ThresholdBand, ThresholdError, ThresholdTable};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while loading the threshold source.
#[derive(Debug, Error)]
pub enum ThresholdSourceError {
    #[error("Failed to read threshold file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse threshold CSV: {0}")]
    Parse(String),

    #[error("Threshold CSV is missing column '{column}' required for pollutant {pollutant}")]
    MissingColumn { pollutant: String, column: String },

    #[error("Threshold CSV row {row}: cannot parse '{value}' in column '{column}' as a number")]
    BadNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Threshold table is malformed: {0}")]
    Invalid(#[from] ThresholdError),
}

impl From<ThresholdSourceError> for aerwatch_core::Error {
    fn from(err: ThresholdSourceError) -> Self {
        aerwatch_core::Error::Config {
            message: err.to_string(),
        }
    }
}

/// Load and validate the threshold table for the given pollutants.
pub fn load_from_path(
    path: &Path,
    pollutants: &[PollutantId],
) -> Result<ThresholdTable, ThresholdSourceError> {
    let text = std::fs::read_to_string(path).map_err(|e| ThresholdSourceError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let table = load_from_str(&text, pollutants)?;
    info!(
        path = %path.display(),
        pollutants = pollutants.len(),
        "Loaded threshold table"
    );
    Ok(table)
}

/// Parse threshold CSV text into a validated table.
pub fn load_from_str(
    text: &str,
    pollutants: &[PollutantId],
) -> Result<ThresholdTable, ThresholdSourceError> {
    let (headers, rows) = csv::parse_csv(text).map_err(ThresholdSourceError::Parse)?;

    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let name_col = column("Qualitative Name").ok_or_else(|| missing("*", "Qualitative Name"))?;
    let index_col = column("Index").ok_or_else(|| missing("*", "Index"))?;

    let mut bands = Vec::new();

    for pollutant in pollutants {
        let lower_name = format!("{pollutant} Lower");
        let upper_name = format!("{pollutant} Upper");
        let rec_name = format!("{pollutant} Recommendations");

        let lower_col =
            column(&lower_name).ok_or_else(|| missing(pollutant.as_str(), &lower_name))?;
        let upper_col =
            column(&upper_name).ok_or_else(|| missing(pollutant.as_str(), &upper_name))?;
        let rec_col = column(&rec_name).ok_or_else(|| missing(pollutant.as_str(), &rec_name))?;

        for (row_idx, row) in rows.iter().enumerate() {
            let cell = |col: usize| row.get(col).map(String::as_str).unwrap_or("").trim();

            let lower = parse_number(cell(lower_col), row_idx, &lower_name)?;
            let upper = parse_number(cell(upper_col), row_idx, &upper_name)?;
            let severity_index = cell(index_col).parse::<u8>().map_err(|_| {
                ThresholdSourceError::BadNumber {
                    row: row_idx + 1,
                    column: "Index".into(),
                    value: cell(index_col).to_string(),
                }
            })?;

            let recommendation = match cell(rec_col) {
                "" => None,
                text => Some(text.to_string()),
            };

            bands.push(ThresholdBand {
                pollutant: pollutant.clone(),
                lower,
                upper,
                qualitative_name: cell(name_col).to_string(),
                severity_index,
                recommendation,
            });
        }
    }

    Ok(ThresholdTable::new(bands)?)
}

fn missing(pollutant: &str, column: &str) -> ThresholdSourceError {
    ThresholdSourceError::MissingColumn {
        pollutant: pollutant.to_string(),
        column: column.to_string(),
    }
}

fn parse_number(value: &str, row: usize, column: &str) -> Result<f64, ThresholdSourceError> {
    value
        .parse::<f64>()
        .map_err(|_| ThresholdSourceError::BadNumber {
            row: row + 1,
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// A starter threshold table written by `aerwatch onboard`.
///
/// Bounds follow the OpenWeather Air Pollution index scale (μg/m³); the
/// worst band is capped with a generous sentinel upper bound since the table
/// must cover every value it is expected to classify.
pub const STARTER_CSV: &str = "\
Qualitative Name,Index,CO Lower,CO Upper,CO Recommendations,NO2 Lower,NO2 Upper,NO2 Recommendations,O3 Lower,O3 Upper,O3 Recommendations,SO2 Lower,SO2 Upper,SO2 Recommendations,PM2.5 Lower,PM2.5 Upper,PM2.5 Recommendations,PM10 Lower,PM10 Upper,PM10 Recommendations
Good,1,0,4400,,0,40,Ventilate regularly,0,60,Ventilate regularly,0,20,,0,10,Enjoy outdoor activities,0,20,
Fair,2,4400,9400,Limit time near busy roads,40,70,Ventilate regularly,60,100,Limit midday outdoor exercise,20,80,,10,25,Sensitive groups should watch for symptoms,20,50,Sensitive groups should watch for symptoms
Moderate,3,9400,12400,Limit time near busy roads,70,150,Keep windows closed at rush hour,100,140,Limit midday outdoor exercise,80,250,Sensitive groups should limit outdoor exertion,25,50,Consider a mask outdoors,50,100,Consider a mask outdoors
Poor,4,12400,15400,Avoid busy roads,150,200,Keep windows closed,140,180,Avoid outdoor exercise,250,350,Limit outdoor exertion,50,75,Wear a mask outdoors,100,200,Wear a mask outdoors
Very Poor,5,15400,100000,Stay indoors with windows closed,200,1000,Stay indoors with windows closed,180,1000,Stay indoors with windows closed,350,2000,Stay indoors with windows closed,75,1000,Stay indoors and use an air purifier,200,2000,Stay indoors and use an air purifier
";

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<PollutantId> {
        names.iter().map(|n| PollutantId::new(*n)).collect()
    }

    const SAMPLE: &str = "\
Qualitative Name,Index,CO Lower,CO Upper,CO Recommendations,NO2 Lower,NO2 Upper,NO2 Recommendations
Good,1,0,4400,,0,40,Ventilate regularly
Fair,2,4400,9400,\"Limit time near busy roads, keep windows closed\",40,70,Ventilate regularly
";

    #[test]
    fn loads_bands_in_row_order() {
        let table = load_from_str(SAMPLE, &ids(&["CO", "NO2"])).unwrap();

        let co = table.bands_for(&"CO".into());
        assert_eq!(co.len(), 2);
        assert_eq!(co[0].qualitative_name, "Good");
        assert_eq!(co[0].severity_index, 1);
        assert_eq!(co[1].qualitative_name, "Fair");

        // Empty cell becomes no recommendation; quoted commas survive.
        assert_eq!(co[0].recommendation, None);
        assert_eq!(
            co[1].recommendation.as_deref(),
            Some("Limit time near busy roads, keep windows closed")
        );
    }

    #[test]
    fn boundary_value_classifies_to_earlier_row() {
        let table = load_from_str(SAMPLE, &ids(&["CO"])).unwrap();
        let band = table.lookup(&"CO".into(), 4400.0).unwrap();
        assert_eq!(band.qualitative_name, "Good");
    }

    #[test]
    fn unconfigured_pollutant_columns_are_ignored() {
        // NO2 columns exist in the file but only CO is configured.
        let table = load_from_str(SAMPLE, &ids(&["CO"])).unwrap();
        assert!(!table.covers(&"NO2".into()));
    }

    #[test]
    fn missing_column_for_configured_pollutant() {
        let err = load_from_str(SAMPLE, &ids(&["CO", "PM10"])).unwrap_err();
        match err {
            ThresholdSourceError::MissingColumn { pollutant, column } => {
                assert_eq!(pollutant, "PM10");
                assert_eq!(column, "PM10 Lower");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_bound_reports_row_and_column() {
        let bad = "\
Qualitative Name,Index,CO Lower,CO Upper,CO Recommendations
Good,1,zero,4400,
";
        let err = load_from_str(bad, &ids(&["CO"])).unwrap_err();
        match err {
            ThresholdSourceError::BadNumber { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "CO Lower");
                assert_eq!(value, "zero");
            }
            other => panic!("expected BadNumber, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_rows_rejected_at_load() {
        let bad = "\
Qualitative Name,Index,CO Lower,CO Upper,CO Recommendations
Good,1,0,5000,
Fair,2,4400,9400,
";
        let err = load_from_str(bad, &ids(&["CO"])).unwrap_err();
        assert!(matches!(
            err,
            ThresholdSourceError::Invalid(ThresholdError::Overlap { .. })
        ));
    }

    #[test]
    fn blank_name_cell_rejected_at_load() {
        let bad = "\
Qualitative Name,Index,CO Lower,CO Upper,CO Recommendations
,1,0,4400,
";
        let err = load_from_str(bad, &ids(&["CO"])).unwrap_err();
        assert!(matches!(
            err,
            ThresholdSourceError::Invalid(ThresholdError::UnnamedBand { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_from_path(Path::new("/nonexistent/thresholds.csv"), &ids(&["CO"]))
            .unwrap_err();
        assert!(matches!(err, ThresholdSourceError::Read { .. }));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thresholds.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let table = load_from_path(&path, &ids(&["CO", "NO2"])).unwrap();
        assert!(table.covers(&"CO".into()));
        assert!(table.covers(&"NO2".into()));
    }

    #[test]
    fn starter_csv_loads_for_default_pollutants() {
        let pollutants = ids(&["CO", "NO2", "O3", "SO2", "PM2.5", "PM10"]);
        let table = load_from_str(STARTER_CSV, &pollutants).unwrap();

        for p in &pollutants {
            assert_eq!(table.bands_for(p).len(), 5, "{p} should have 5 bands");
        }

        // Spot-check the scale: a clean day classifies as Good everywhere.
        let band = table.lookup(&"PM2.5".into(), 9.0).unwrap();
        assert_eq!(band.qualitative_name, "Good");
        assert_eq!(band.severity_index, 1);
    }
}
