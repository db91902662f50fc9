//! Request building for sentiment sources.

use crate::registry::inject_api_key;
use chrono::{DateTime, SecondsFormat, Utc};
use quarry_traits::{
    Params, QuarryError, Result, ScrapeRequest, Scraper, SourceDescriptor,
};

/// Number of items requested when no limit is given.
pub const DEFAULT_LIMIT: u32 = 100;

/// Arguments for a sentiment scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentQuery {
    /// Free-text search query.
    pub query: String,
    /// Earliest creation time, sent as `start_time` (RFC 3339).
    pub start: Option<DateTime<Utc>>,
    /// Latest creation time, sent as `end_time` (RFC 3339).
    pub end: Option<DateTime<Utc>>,
    /// Maximum number of items.
    pub limit: u32,
}

impl SentimentQuery {
    /// Search for `query` with the default limit and no date bounds.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            start: None,
            end: None,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Bound the search to `[start, end]`.
    #[must_use]
    pub const fn with_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Request at most `limit` items.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Builds search requests for a sentiment source.
#[derive(Debug, Clone)]
pub struct SentimentScraper {
    source: SourceDescriptor,
    api_key: Option<String>,
}

impl SentimentScraper {
    /// Create a scraper for `source`, authenticating with `api_key` when required.
    #[must_use]
    pub const fn new(source: SourceDescriptor, api_key: Option<String>) -> Self {
        Self { source, api_key }
    }
}

impl Scraper for SentimentScraper {
    type Query = SentimentQuery;

    fn source(&self) -> &SourceDescriptor {
        &self.source
    }

    fn build_request(&self, query: &SentimentQuery) -> Result<ScrapeRequest> {
        let text = query.query.trim();
        if text.is_empty() {
            return Err(QuarryError::InvalidArgument(
                "sentiment scrape requires a query".to_string(),
            ));
        }
        if query.limit == 0 {
            return Err(QuarryError::InvalidArgument(
                "limit must be at least 1".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (query.start, query.end)
            && start > end
        {
            return Err(QuarryError::InvalidArgument(format!(
                "start {start} is after end {end}"
            )));
        }

        let mut params = Params::new();
        params.insert("q".to_string(), text.to_string());
        params.insert("limit".to_string(), query.limit.to_string());
        if let Some(start) = query.start {
            params.insert(
                "start_time".to_string(),
                start.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        }
        if let Some(end) = query.end {
            params.insert(
                "end_time".to_string(),
                end.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        }
        inject_api_key(&self.source, self.api_key.as_deref(), &mut params);

        Ok(ScrapeRequest::get(self.source.url("search"), params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{NEWSAPI, TWITTER};
    use chrono::TimeZone;

    #[test]
    fn test_search_request() {
        let scraper = SentimentScraper::new(TWITTER, Some("tw".to_string()));
        let request = scraper
            .build_request(&SentimentQuery::new("oil prices").with_limit(10))
            .unwrap();

        assert_eq!(request.url, "https://api.twitter.com/2/search");
        assert_eq!(request.params.get("q").map(String::as_str), Some("oil prices"));
        assert_eq!(request.params.get("limit").map(String::as_str), Some("10"));
        assert_eq!(request.params.get("api_key").map(String::as_str), Some("tw"));
        assert!(!request.params.contains_key("start_time"));
    }

    #[test]
    fn test_window_is_iso8601() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 8, 12, 30, 0).unwrap();
        let scraper = SentimentScraper::new(NEWSAPI, None);

        let request = scraper
            .build_request(&SentimentQuery::new("fed").with_window(start, end))
            .unwrap();

        assert_eq!(
            request.params.get("start_time").map(String::as_str),
            Some("2024-03-01T00:00:00Z")
        );
        assert_eq!(
            request.params.get("end_time").map(String::as_str),
            Some("2024-03-08T12:30:00Z")
        );
        assert_eq!(
            request.params.get("limit").map(String::as_str),
            Some("100")
        );
    }

    #[test]
    fn test_rejects_empty_query_and_zero_limit() {
        let scraper = SentimentScraper::new(TWITTER, None);
        assert!(scraper.build_request(&SentimentQuery::new("")).is_err());
        assert!(
            scraper
                .build_request(&SentimentQuery::new("oil").with_limit(0))
                .is_err()
        );
    }

    #[test]
    fn test_rejects_inverted_window() {
        let start = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let scraper = SentimentScraper::new(NEWSAPI, None);

        let err = scraper
            .build_request(&SentimentQuery::new("fed").with_window(start, end))
            .unwrap_err();
        assert!(matches!(err, QuarryError::InvalidArgument(_)));

        let same_instant = SentimentQuery::new("fed").with_window(start, start);
        assert!(scraper.build_request(&same_instant).is_ok());
    }
}
