//! Normalized record shapes.
//!
//! Each processor turns one source-specific JSON response into one of these
//! source-agnostic records. Records are plain data: once a processor returns
//! one it is never mutated.
//!
//! Every record can also be viewed as a Polars [`DataFrame`], one row per
//! observation, for tabular display or downstream analysis.

use crate::{DataType, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One country's observation of a macroeconomic indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroValue {
    /// Country code as reported by the source.
    pub country: String,
    /// Observed value.
    pub value: Option<f64>,
    /// Unit of measure (empty when the source does not report one).
    #[serde(default)]
    pub unit: String,
    /// Observation date or period label.
    pub date: Option<String>,
}

/// Normalized macroeconomic record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRecord {
    /// Source key, `"unknown"` when not annotated.
    pub source: String,
    /// Indicator name (e.g. `gdp`).
    pub indicator: Option<String>,
    /// One entry per country.
    pub values: Vec<MacroValue>,
}

/// One bar of OHLCV price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Bar timestamp, Unix seconds.
    pub date: i64,
    /// Opening price.
    pub open: Option<f64>,
    /// High price.
    pub high: Option<f64>,
    /// Low price.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Traded volume.
    pub volume: Option<u64>,
}

/// Normalized asset price record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Source key.
    pub source: String,
    /// Symbol or comma-joined symbols.
    pub symbol: Option<String>,
    /// Provider metadata passed through untouched.
    #[serde(default)]
    pub meta: Value,
    /// Index-aligned price bars.
    pub prices: Vec<PricePoint>,
}

/// One scored piece of sentiment text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentItem {
    /// Provider identifier for the item.
    pub id: Option<String>,
    /// The text that was scored.
    pub text: String,
    /// Creation timestamp as reported by the provider.
    pub created_at: String,
    /// Lexical score in `[-1.0, 1.0]`.
    pub sentiment: f64,
    /// Engagement metrics (likes, reposts, ...) when the provider reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Value>,
}

/// Normalized sentiment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Source key.
    pub source: String,
    /// The search query that produced the items.
    #[serde(default)]
    pub query: String,
    /// Scored items.
    pub items: Vec<SentimentItem>,
}

/// A normalized record of any data type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedRecord {
    /// Macroeconomic record.
    Macro(MacroRecord),
    /// Asset price record.
    Asset(AssetRecord),
    /// Sentiment record.
    Sentiment(SentimentRecord),
}

impl NormalizedRecord {
    /// The data type of the wrapped record.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Macro(_) => DataType::Macro,
            Self::Asset(_) => DataType::Asset,
            Self::Sentiment(_) => DataType::Sentiment,
        }
    }

    /// Number of observations (values, prices or items).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Macro(r) => r.values.len(),
            Self::Asset(r) => r.prices.len(),
            Self::Sentiment(r) => r.items.len(),
        }
    }

    /// Whether the record holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tabular view of the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be assembled.
    pub fn to_frame(&self) -> Result<DataFrame> {
        match self {
            Self::Macro(r) => r.to_frame(),
            Self::Asset(r) => r.to_frame(),
            Self::Sentiment(r) => r.to_frame(),
        }
    }
}

impl From<MacroRecord> for NormalizedRecord {
    fn from(record: MacroRecord) -> Self {
        Self::Macro(record)
    }
}

impl From<AssetRecord> for NormalizedRecord {
    fn from(record: AssetRecord) -> Self {
        Self::Asset(record)
    }
}

impl From<SentimentRecord> for NormalizedRecord {
    fn from(record: SentimentRecord) -> Self {
        Self::Sentiment(record)
    }
}

impl MacroRecord {
    /// One row per country: `country`, `value`, `unit`, `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be assembled.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let country: Vec<&str> = self.values.iter().map(|v| v.country.as_str()).collect();
        let value: Vec<Option<f64>> = self.values.iter().map(|v| v.value).collect();
        let unit: Vec<&str> = self.values.iter().map(|v| v.unit.as_str()).collect();
        let date: Vec<Option<&str>> = self.values.iter().map(|v| v.date.as_deref()).collect();

        Ok(df! {
            "country" => country,
            "value" => value,
            "unit" => unit,
            "date" => date,
        }?)
    }
}

impl AssetRecord {
    /// One row per bar: `symbol`, `date`, `open`, `high`, `low`, `close`, `volume`.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be assembled.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let symbol: Vec<Option<&str>> = vec![self.symbol.as_deref(); self.prices.len()];
        let date: Vec<i64> = self.prices.iter().map(|p| p.date).collect();
        let open: Vec<Option<f64>> = self.prices.iter().map(|p| p.open).collect();
        let high: Vec<Option<f64>> = self.prices.iter().map(|p| p.high).collect();
        let low: Vec<Option<f64>> = self.prices.iter().map(|p| p.low).collect();
        let close: Vec<Option<f64>> = self.prices.iter().map(|p| p.close).collect();
        let volume: Vec<Option<u64>> = self.prices.iter().map(|p| p.volume).collect();

        Ok(df! {
            "symbol" => symbol,
            "date" => date,
            "open" => open,
            "high" => high,
            "low" => low,
            "close" => close,
            "volume" => volume,
        }?)
    }
}

impl SentimentRecord {
    /// One row per item: `id`, `created_at`, `sentiment`, `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be assembled.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let id: Vec<Option<&str>> = self.items.iter().map(|i| i.id.as_deref()).collect();
        let created_at: Vec<&str> = self.items.iter().map(|i| i.created_at.as_str()).collect();
        let sentiment: Vec<f64> = self.items.iter().map(|i| i.sentiment).collect();
        let text: Vec<&str> = self.items.iter().map(|i| i.text.as_str()).collect();

        Ok(df! {
            "id" => id,
            "created_at" => created_at,
            "sentiment" => sentiment,
            "text" => text,
        }?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_asset() -> AssetRecord {
        AssetRecord {
            source: "yahoo".to_string(),
            symbol: Some("AAPL".to_string()),
            meta: json!({}),
            prices: vec![
                PricePoint {
                    date: 100,
                    open: Some(1.0),
                    high: Some(2.0),
                    low: Some(0.5),
                    close: Some(1.5),
                    volume: Some(1_000),
                },
                PricePoint {
                    date: 200,
                    open: Some(1.5),
                    high: None,
                    low: Some(1.0),
                    close: Some(1.2),
                    volume: None,
                },
            ],
        }
    }

    #[test]
    fn test_macro_record_serializes_to_wire_shape() {
        let record = MacroRecord {
            source: "unknown".to_string(),
            indicator: Some("gdp".to_string()),
            values: vec![MacroValue {
                country: "USA".to_string(),
                value: Some(21.4),
                unit: "T".to_string(),
                date: Some("2023".to_string()),
            }],
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "source": "unknown",
                "indicator": "gdp",
                "values": [{"country": "USA", "value": 21.4, "unit": "T", "date": "2023"}]
            })
        );
    }

    #[test]
    fn test_sentiment_item_omits_absent_metrics() {
        let item = SentimentItem {
            id: Some("1".to_string()),
            text: "flat".to_string(),
            created_at: String::new(),
            sentiment: 0.0,
            metrics: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("metrics").is_none());
    }

    #[test]
    fn test_normalized_record_data_type_and_len() {
        let record = NormalizedRecord::from(sample_asset());
        assert_eq!(record.data_type(), DataType::Asset);
        assert_eq!(record.len(), 2);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_asset_frame() {
        let df = sample_asset().to_frame().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>(),
            vec!["symbol", "date", "open", "high", "low", "close", "volume"]
        );
        assert_eq!(df.column("high").unwrap().null_count(), 1);
    }

    #[test]
    fn test_empty_sentiment_frame() {
        let record = SentimentRecord {
            source: "twitter".to_string(),
            query: "gold".to_string(),
            items: vec![],
        };
        let df = record.to_frame().unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 4);
    }
}
