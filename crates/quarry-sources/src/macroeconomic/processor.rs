//! Normalization of macroeconomic responses.

use crate::json::{number, string_field};
use quarry_traits::{DataType, MacroRecord, MacroValue, Processor, RawResponse, Result};
use serde_json::Value;

/// Reshapes `{"data": {country: {value, unit, date}}}` into a [`MacroRecord`].
///
/// A response without a `data` object yields an empty value list, not an
/// error. Validation still requires an `indicator`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroProcessor;

impl MacroProcessor {
    fn values(raw: &RawResponse) -> Vec<MacroValue> {
        raw.get("data")
            .and_then(Value::as_object)
            .map(|data| {
                data.iter()
                    .map(|(country, entry)| MacroValue {
                        country: country.clone(),
                        value: entry.get("value").and_then(number),
                        unit: string_field(entry, "unit").unwrap_or_default(),
                        date: string_field(entry, "date"),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Processor for MacroProcessor {
    type Record = MacroRecord;

    fn name(&self) -> &str {
        DataType::Macro.as_str()
    }

    fn process(&self, raw: &RawResponse) -> Result<MacroRecord> {
        let record = MacroRecord {
            source: string_field(raw, "source").unwrap_or_else(|| "unknown".to_string()),
            indicator: string_field(raw, "indicator"),
            values: Self::values(raw),
        };
        self.validate(&record)?;
        Ok(record)
    }

    fn required_fields(&self) -> &[&str] {
        DataType::Macro.required_fields()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quarry_traits::QuarryError;
    use serde_json::json;

    #[test]
    fn test_processes_country_map() {
        let raw = json!({
            "source": "imf",
            "indicator": "gdp",
            "data": {"USA": {"value": 21.4, "unit": "T", "date": "2023"}}
        });

        let record = MacroProcessor.process(&raw).unwrap();
        assert_eq!(record.source, "imf");
        assert_eq!(record.indicator.as_deref(), Some("gdp"));
        assert_eq!(record.values.len(), 1);

        let usa = &record.values[0];
        assert_eq!(usa.country, "USA");
        assert_relative_eq!(usa.value.unwrap(), 21.4);
        assert_eq!(usa.unit, "T");
        assert_eq!(usa.date.as_deref(), Some("2023"));
    }

    #[test]
    fn test_missing_fields_default() {
        let raw = json!({
            "indicator": "inflation",
            "data": {"DEU": {"value": null}, "FRA": {"value": "2.1", "date": 2024}}
        });

        let record = MacroProcessor.process(&raw).unwrap();
        assert_eq!(record.source, "unknown");

        let deu = record.values.iter().find(|v| v.country == "DEU").unwrap();
        assert!(deu.value.is_none());
        assert_eq!(deu.unit, "");
        assert!(deu.date.is_none());

        let fra = record.values.iter().find(|v| v.country == "FRA").unwrap();
        assert_relative_eq!(fra.value.unwrap(), 2.1);
        assert_eq!(fra.date.as_deref(), Some("2024"));
    }

    #[test]
    fn test_missing_data_yields_empty_values() {
        let record = MacroProcessor
            .process(&json!({"indicator": "gdp", "source": "imf"}))
            .unwrap();
        assert!(record.values.is_empty());
    }

    #[test]
    fn test_missing_indicator_fails_validation() {
        let err = MacroProcessor
            .process(&json!({"data": {"USA": {"value": 1.0}}}))
            .unwrap_err();
        match err {
            QuarryError::ValidationFailed { processor, missing } => {
                assert_eq!(processor, "macro");
                assert_eq!(missing, vec!["indicator".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
