//! Request building for asset price sources.

use crate::registry::inject_api_key;
use chrono::{DateTime, Utc};
use quarry_traits::{
    Params, QuarryError, Result, ScrapeRequest, Scraper, SourceDescriptor,
};

/// Bar interval used when none is given.
pub const DEFAULT_INTERVAL: &str = "1d";

/// Endpoint template name for historical bars.
const HISTORICAL: &str = "historical";

/// Arguments for an asset scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQuery {
    /// Ticker symbols, joined with `,` in the request.
    pub symbols: Vec<String>,
    /// Window start, sent as `period1` (Unix seconds).
    pub start: Option<DateTime<Utc>>,
    /// Window end, sent as `period2` (Unix seconds).
    pub end: Option<DateTime<Utc>>,
    /// Bar interval, e.g. `1d` or `1h`.
    pub interval: String,
}

impl Default for AssetQuery {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            start: None,
            end: None,
            interval: DEFAULT_INTERVAL.to_string(),
        }
    }
}

impl AssetQuery {
    /// Query daily bars for `symbols` with no date bounds.
    #[must_use]
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Bound the query to `[start, end]`.
    #[must_use]
    pub const fn with_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Use a different bar interval.
    #[must_use]
    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = interval.into();
        self
    }

    /// Symbols as they appear in the request path.
    #[must_use]
    pub fn joined_symbols(&self) -> String {
        self.symbols
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Builds chart requests for an asset source.
#[derive(Debug, Clone)]
pub struct AssetScraper {
    source: SourceDescriptor,
    api_key: Option<String>,
}

impl AssetScraper {
    /// Create a scraper for `source`.
    #[must_use]
    pub const fn new(source: SourceDescriptor, api_key: Option<String>) -> Self {
        Self { source, api_key }
    }
}

impl Scraper for AssetScraper {
    type Query = AssetQuery;

    fn source(&self) -> &SourceDescriptor {
        &self.source
    }

    fn build_request(&self, query: &AssetQuery) -> Result<ScrapeRequest> {
        let symbol = query.joined_symbols();
        if symbol.is_empty() {
            return Err(QuarryError::InvalidArgument(
                "asset scrape requires at least one symbol".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (query.start, query.end)
            && start > end
        {
            return Err(QuarryError::InvalidArgument(format!(
                "start {start} is after end {end}"
            )));
        }

        let template = self.source.endpoint(HISTORICAL).unwrap_or("{symbol}");
        let path = template.replace("{symbol}", &symbol);

        let mut params = Params::new();
        params.insert("interval".to_string(), query.interval.clone());
        if let Some(start) = query.start {
            params.insert("period1".to_string(), start.timestamp().to_string());
        }
        if let Some(end) = query.end {
            params.insert("period2".to_string(), end.timestamp().to_string());
        }
        inject_api_key(&self.source, self.api_key.as_deref(), &mut params);

        Ok(ScrapeRequest::get(self.source.url(&path), params))
    }
}
