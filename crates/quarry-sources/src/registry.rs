//! Source registry for discovering the external data providers.
//!
//! The registry is a fixed table of [`SourceDescriptor`]s compiled into the
//! binary. Descriptors are looked up by their short key or registry name,
//! case-insensitively, and are never mutated.

use quarry_traits::{DataType, Params, QuarryError, Result, SourceDescriptor};
use tracing::warn;

/// International Monetary Fund DataMapper API.
pub const IMF: SourceDescriptor = SourceDescriptor {
    key: "imf",
    name: "IMF",
    data_type: DataType::Macro,
    base_url: "https://www.imf.org/external/datamapper/api/v1/",
    endpoints: &[
        ("gdp", "NGDPD"),
        ("inflation", "PCPIPCH"),
        ("unemployment", "LUR"),
    ],
    api_key_required: false,
};

/// Federal Reserve Economic Data.
pub const FRED: SourceDescriptor = SourceDescriptor {
    key: "fred",
    name: "FRED",
    data_type: DataType::Macro,
    base_url: "https://api.stlouisfed.org/fred/",
    endpoints: &[],
    api_key_required: true,
};

/// Yahoo Finance chart API.
pub const YAHOO_FINANCE: SourceDescriptor = SourceDescriptor {
    key: "yahoo",
    name: "YAHOO_FINANCE",
    data_type: DataType::Asset,
    base_url: "https://query1.finance.yahoo.com/v8/finance/chart/",
    endpoints: &[("historical", "{symbol}")],
    api_key_required: false,
};

/// Twitter v2 search.
pub const TWITTER: SourceDescriptor = SourceDescriptor {
    key: "twitter",
    name: "TWITTER",
    data_type: DataType::Sentiment,
    base_url: "https://api.twitter.com/2/",
    endpoints: &[],
    api_key_required: true,
};

/// NewsAPI article search.
pub const NEWSAPI: SourceDescriptor = SourceDescriptor {
    key: "newsapi",
    name: "NEWSAPI",
    data_type: DataType::Sentiment,
    base_url: "https://newsapi.org/v2/",
    endpoints: &[],
    api_key_required: true,
};

/// Every registered source.
pub const SOURCES: &[SourceDescriptor] = &[IMF, FRED, YAHOO_FINANCE, TWITTER, NEWSAPI];

/// Get information about all available sources.
#[must_use]
pub const fn available_sources() -> &'static [SourceDescriptor] {
    SOURCES
}

/// Find a source by key or registry name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static SourceDescriptor> {
    SOURCES.iter().find(|s| s.matches(name))
}

/// Sources that feed the given data type.
#[must_use]
pub fn sources_for(data_type: DataType) -> Vec<&'static SourceDescriptor> {
    SOURCES.iter().filter(|s| s.data_type == data_type).collect()
}

/// Find the source serving `data_type` under `name`.
///
/// # Errors
///
/// Returns [`QuarryError::UnsupportedSource`] if no such source exists or it
/// serves a different data type.
pub fn resolve(data_type: DataType, name: &str) -> Result<&'static SourceDescriptor> {
    lookup(name)
        .filter(|s| s.data_type == data_type)
        .ok_or_else(|| QuarryError::UnsupportedSource {
            data_type: data_type.to_string(),
            source_name: name.to_string(),
        })
}

/// Add the `api_key` parameter when the source requires one.
pub(crate) fn inject_api_key(
    source: &SourceDescriptor,
    api_key: Option<&str>,
    params: &mut Params,
) {
    if !source.api_key_required {
        return;
    }
    match api_key {
        Some(key) => {
            params.insert("api_key".to_string(), key.to_string());
        }
        None => warn!(source = source.name, "source requires an API key but none is configured"),
    }
}
