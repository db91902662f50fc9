//! Common types used throughout quarry.
//!
//! This module defines the data-type taxonomy, request parameter maps,
//! source descriptors and the request description a scraper hands to the
//! HTTP layer.

use crate::{QuarryError, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Query parameters for an outbound request.
///
/// A `BTreeMap` keeps keys sorted, so two maps holding the same pairs
/// always iterate and serialize identically regardless of insertion order.
pub type Params = BTreeMap<String, String>;

/// An opaque JSON tree returned by an external API.
pub type RawResponse = serde_json::Value;

/// The kind of market data a pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Macroeconomic indicators (GDP, inflation, unemployment).
    Macro,
    /// Asset and commodity price history.
    Asset,
    /// Free-text market sentiment.
    Sentiment,
}

impl DataType {
    /// All data types, in display order.
    pub const ALL: [Self; 3] = [Self::Macro, Self::Asset, Self::Sentiment];

    /// The lowercase wire name, also used as the internal API endpoint.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Macro => "macro",
            Self::Asset => "asset",
            Self::Sentiment => "sentiment",
        }
    }

    /// Fields every normalized record of this type must carry.
    #[must_use]
    pub const fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Macro => &["indicator", "values"],
            Self::Asset => &["symbol", "prices"],
            Self::Sentiment => &["source", "items"],
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "macro" => Ok(Self::Macro),
            "asset" => Ok(Self::Asset),
            "sentiment" => Ok(Self::Sentiment),
            other => Err(QuarryError::InvalidArgument(format!(
                "unknown data type '{other}' (expected macro, asset or sentiment)"
            ))),
        }
    }
}

/// HTTP verb used for a scrape request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
}

impl HttpMethod {
    /// The verb as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one external data provider.
///
/// Descriptors are built into the binary and never mutated; they are looked
/// up by name only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceDescriptor {
    /// Short lookup key used on the command line (e.g. `yahoo`).
    pub key: &'static str,
    /// Registry name (e.g. `YAHOO_FINANCE`).
    pub name: &'static str,
    /// The data type this source feeds.
    pub data_type: DataType,
    /// Base URL; endpoint paths are appended verbatim.
    pub base_url: &'static str,
    /// Named endpoint templates.
    pub endpoints: &'static [(&'static str, &'static str)],
    /// Whether requests must carry the configured API key.
    pub api_key_required: bool,
}

impl SourceDescriptor {
    /// Resolve a named endpoint template.
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&'static str> {
        self.endpoints
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, path)| *path)
    }

    /// Join an endpoint path onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Whether this descriptor answers to `name` (key or registry name, any case).
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name) || self.name.eq_ignore_ascii_case(name)
    }
}

/// A fully resolved outbound request, produced by a scraper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeRequest {
    /// Absolute URL without query string.
    pub url: String,
    /// Query parameters.
    pub params: Params,
    /// HTTP verb.
    pub method: HttpMethod,
}

impl ScrapeRequest {
    /// Create a `GET` request.
    #[must_use]
    pub const fn get(url: String, params: Params) -> Self {
        Self {
            url,
            params,
            method: HttpMethod::Get,
        }
    }
}
