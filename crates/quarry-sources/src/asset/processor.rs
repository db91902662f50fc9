//! Normalization of chart responses.

use crate::json::string_field;
use quarry_traits::{
    AssetRecord, DataType, PricePoint, Processor, RawResponse, Result,
};
use serde_json::{Map, Value};

/// Reshapes a Yahoo-style `chart.result` payload into an [`AssetRecord`].
///
/// Bars are aligned by index against `timestamp`; a missing or short quote
/// series yields `None` for that field. Any structurally unexpected payload
/// produces an empty price list rather than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetProcessor;

impl AssetProcessor {
    fn prices(raw: &RawResponse) -> Vec<PricePoint> {
        raw.pointer("/chart/result")
            .and_then(Value::as_array)
            .map(|results| results.iter().flat_map(bars).collect())
            .unwrap_or_default()
    }

    fn meta(raw: &RawResponse) -> Value {
        raw.get("meta")
            .or_else(|| raw.pointer("/chart/result/0/meta"))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}

fn bars(result: &Value) -> Vec<PricePoint> {
    let Some(timestamps) = result.get("timestamp").and_then(Value::as_array) else {
        return Vec::new();
    };
    let Some(quote) = result
        .pointer("/indicators/quote/0")
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    let at = |field: &str, i: usize| quote.get(field).and_then(|s| s.get(i));
    let price = |field: &str, i: usize| at(field, i).and_then(Value::as_f64);

    timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            Some(PricePoint {
                date: ts.as_i64()?,
                open: price("open", i),
                high: price("high", i),
                low: price("low", i),
                close: price("close", i),
                volume: at("volume", i).and_then(|v| {
                    v.as_u64()
                        .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
                }),
            })
        })
        .collect()
}

impl Processor for AssetProcessor {
    type Record = AssetRecord;

    fn name(&self) -> &str {
        DataType::Asset.as_str()
    }

    fn process(&self, raw: &RawResponse) -> Result<AssetRecord> {
        let record = AssetRecord {
            source: string_field(raw, "source").unwrap_or_else(|| "unknown".to_string()),
            symbol: string_field(raw, "symbol"),
            meta: Self::meta(raw),
            prices: Self::prices(raw),
        };
        self.validate(&record)?;
        Ok(record)
    }

    fn required_fields(&self) -> &[&str] {
        DataType::Asset.required_fields()
    }
}
