//! Error types for the quarry scraper.
//!
//! A single error enum covers the fetch layer, the processors, the
//! orchestrator and the API forwarding path. Cache problems never surface
//! here: the cache is advisory and its failures are logged and swallowed.

use thiserror::Error;

/// The main error type for quarry operations.
#[derive(Debug, Error)]
pub enum QuarryError {
    /// Every fetch attempt failed with a transport error or a non-2xx status.
    #[error("All {attempts} attempts failed for {url}: {last_error}")]
    FetchExhausted {
        /// The URL that was requested.
        url: String,
        /// How many attempts were made.
        attempts: u32,
        /// The failure reported by the final attempt.
        last_error: String,
    },

    /// A successful response carried a body that is not valid JSON.
    #[error("Malformed JSON response from {url}: {reason}")]
    JsonDecode {
        /// The URL that produced the body.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A normalized record is missing one or more required fields.
    #[error("{processor} record validation failed, missing fields: {}", missing.join(", "))]
    ValidationFailed {
        /// Name of the processor that produced the record.
        processor: String,
        /// The required fields that were absent or null.
        missing: Vec<String>,
    },

    /// No scraper/processor pair is registered for the combination.
    #[error("Unsupported data type or source: {data_type}/{source_name}")]
    UnsupportedSource {
        /// The requested data type.
        data_type: String,
        /// The requested source name.
        source_name: String,
    },

    /// Forwarding a record to the internal API failed.
    #[error("Failed to send data to {endpoint}: {reason}")]
    SendFailed {
        /// The endpoint the record was posted to.
        endpoint: String,
        /// Status or transport diagnostic.
        reason: String,
    },

    /// A caller-supplied argument is missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Serialization of a record failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QuarryError {
    /// Short machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::FetchExhausted { .. } => "fetch_exhausted",
            Self::JsonDecode { .. } => "json_decode",
            Self::ValidationFailed { .. } => "validation_failed",
            Self::UnsupportedSource { .. } => "unsupported_source",
            Self::SendFailed { .. } => "send_failed",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Config(_) => "config",
            Self::Polars(_) => "polars",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// A specialized Result type for quarry operations.
pub type Result<T> = std::result::Result<T, QuarryError>;
