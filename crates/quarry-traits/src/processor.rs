//! Processor trait for normalizing raw responses.
//!
//! A processor maps one source's raw JSON into one normalized record and then
//! checks that the record carries its required fields. A field counts as
//! present when it exists in the serialized record and is not `null`.

use crate::{QuarryError, RawResponse, Result};
use serde::Serialize;

/// Normalizes raw JSON responses into records.
pub trait Processor: Send + Sync {
    /// The record type this processor produces.
    type Record: Serialize;

    /// Returns the name of this processor (e.g. `"macro"`).
    fn name(&self) -> &str;

    /// Transform a raw response into a validated record.
    ///
    /// # Errors
    ///
    /// Returns [`QuarryError::ValidationFailed`] when the record misses a
    /// required field. Validation failures are never retried.
    fn process(&self, raw: &RawResponse) -> Result<Self::Record>;

    /// Fields that must be present and non-null in every record.
    fn required_fields(&self) -> &[&str];

    /// Check a record against [`Processor::required_fields`].
    ///
    /// # Errors
    ///
    /// Returns [`QuarryError::ValidationFailed`] listing every missing field.
    fn validate(&self, record: &Self::Record) -> Result<()> {
        let value = serde_json::to_value(record)?;
        let missing: Vec<String> = self
            .required_fields()
            .iter()
            .filter(|field| value.get(**field).is_none_or(serde_json::Value::is_null))
            .map(|field| (*field).to_string())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        tracing::error!(processor = self.name(), ?missing, "missing required fields");
        Err(QuarryError::ValidationFailed {
            processor: self.name().to_string(),
            missing,
        })
    }
}
