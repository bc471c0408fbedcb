//! Error types for the Aerwatch domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Aerwatch operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Classification errors ---
    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    // --- Threshold table errors ---
    #[error("Threshold table error: {0}")]
    Threshold(#[from] ThresholdError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised by the classification pipeline.
///
/// None of these are recoverable inside the core: a reading that cannot be
/// classified, or an observation missing a tracked pollutant, must surface
/// to the caller rather than being clamped or skipped. A silently-dropped
/// pollutant would corrupt the overall-severity computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error("No threshold band covers {pollutant} = {value}")]
    Unclassified { pollutant: String, value: f64 },

    #[error("Observation at t={timestamp} is missing tracked pollutant '{pollutant}'")]
    MissingPollutant { pollutant: String, timestamp: i64 },

    #[error("Nothing to summarize: result set at t={timestamp} has no pollutants")]
    EmptyResultSet { timestamp: i64 },
}

/// Errors detected when building a threshold table.
///
/// These indicate a malformed reference table and are fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("{pollutant}: bands '{first}' and '{second}' overlap")]
    Overlap {
        pollutant: String,
        first: String,
        second: String,
    },

    #[error("{pollutant}: gap between bands '{first}' (upper {upper}) and '{second}' (lower {lower})")]
    Gap {
        pollutant: String,
        first: String,
        upper: f64,
        second: String,
        lower: f64,
    },

    #[error("Band for {pollutant} has lower bound {lower} above upper bound {upper}")]
    InvertedBounds {
        pollutant: String,
        lower: f64,
        upper: f64,
    },

    #[error("Band for {pollutant} ({lower}..{upper}) has an empty qualitative name")]
    UnnamedBand {
        pollutant: String,
        lower: f64,
        upper: f64,
    },

    #[error("Threshold table has no bands at all")]
    Empty,

    #[error("Tracked pollutant '{0}' has no bands in the threshold table")]
    UnknownPollutant(String),
}

/// Errors from external data providers (pollution source, LLM backend).
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Malformed payload from provider: {0}")]
    MalformedPayload(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}
