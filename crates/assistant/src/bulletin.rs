//! Deterministic bulletin formatting.
//!
//! Everything here is a pure function of the [`Summary`]: the time string,
//! the greeting line, the recommendation bullets, and the per-pollutant
//! level line. The LLM only rephrases this material; it never decides what
//! the air quality *is*.

use aerwatch_core::{Error, Result, Summary};
use chrono::{DateTime, Local, TimeZone, Utc};

/// Format a timestamp the way bulletins present it, e.g.
/// "14:05 PM on 14 November 2023".
pub fn format_time<Tz: TimeZone>(dt: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%H:%M %p on %d %B %Y").to_string()
}

/// The observation time in the machine's local timezone.
///
/// Conversion goes through UTC, which is never ambiguous; a timestamp
/// chrono cannot represent is an error rather than a silently wrong date.
pub fn local_observation_time(timestamp: i64) -> Result<DateTime<Local>> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.with_timezone(&Local))
        .ok_or_else(|| {
            Error::Internal(format!("Observation timestamp {timestamp} is out of range"))
        })
}

/// The greeting line naming the location, local time, and overall level.
pub fn greeting_line(summary: &Summary, location_name: &str) -> Result<String> {
    let time_str = format_time(local_observation_time(summary.timestamp)?);
    Ok(format!(
        "Citizens of {location_name}!\nNow it is {time_str}, air condition is {}.",
        summary.overall_qualitative_name.to_lowercase()
    ))
}

/// The deduplicated recommendations as a bullet list, one per line.
pub fn recommendation_bullets(summary: &Summary) -> String {
    summary
        .recommendations
        .iter()
        .map(|rec| format!("- {rec}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-pollutant severity indices on one line, in result order.
pub fn pollutant_levels_line(summary: &Summary) -> String {
    summary
        .pollutant_indices
        .iter()
        .map(|(pollutant, index)| format!("{pollutant}: {index}"))
        .collect::<Vec<_>>()
        .join(", ")
}
