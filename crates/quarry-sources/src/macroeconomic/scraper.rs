//! Request building for macroeconomic sources.

use crate::registry::inject_api_key;
use quarry_traits::{
    Params, QuarryError, Result, ScrapeRequest, Scraper, SourceDescriptor,
};

/// Arguments for a macro scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroQuery {
    /// Indicator name (`gdp`) or a raw provider series code.
    pub indicator: String,
    /// Optional country code filter.
    pub country: Option<String>,
    /// Additional provider-specific query parameters.
    pub extra: Params,
}

impl MacroQuery {
    /// Query an indicator for every country.
    #[must_use]
    pub fn new(indicator: impl Into<String>) -> Self {
        Self {
            indicator: indicator.into(),
            ..Self::default()
        }
    }

    /// Restrict the query to one country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Add a provider-specific parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Builds indicator requests for a macro source.
///
/// Named indicators resolve through the source's endpoint table; anything
/// else is used verbatim as the path, so raw series codes work too.
#[derive(Debug, Clone)]
pub struct MacroScraper {
    source: SourceDescriptor,
    api_key: Option<String>,
}

impl MacroScraper {
    /// Create a scraper for `source`, authenticating with `api_key` when required.
    #[must_use]
    pub const fn new(source: SourceDescriptor, api_key: Option<String>) -> Self {
        Self { source, api_key }
    }
}

impl Scraper for MacroScraper {
    type Query = MacroQuery;

    fn source(&self) -> &SourceDescriptor {
        &self.source
    }

    fn build_request(&self, query: &MacroQuery) -> Result<ScrapeRequest> {
        let indicator = query.indicator.trim();
        if indicator.is_empty() {
            return Err(QuarryError::InvalidArgument(
                "macro scrape requires an indicator".to_string(),
            ));
        }

        let path = self.source.endpoint(indicator).unwrap_or(indicator);

        let mut params = query.extra.clone();
        if let Some(country) = &query.country {
            params.insert("country".to_string(), country.clone());
        }
        inject_api_key(&self.source, self.api_key.as_deref(), &mut params);

        Ok(ScrapeRequest::get(self.source.url(path), params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FRED, IMF};
    use quarry_traits::HttpMethod;

    #[test]
    fn test_named_indicator_resolves_endpoint() {
        let scraper = MacroScraper::new(IMF, Some("ignored".to_string()));
        let request = scraper
            .build_request(&MacroQuery::new("gdp").with_country("USA"))
            .unwrap();

        assert_eq!(
            request.url,
            "https://www.imf.org/external/datamapper/api/v1/NGDPD"
        );
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.params.get("country").map(String::as_str), Some("USA"));
        // IMF does not take a key
        assert!(!request.params.contains_key("api_key"));
    }

    #[test]
    fn test_unknown_indicator_is_used_verbatim() {
        let scraper = MacroScraper::new(IMF, None);
        let request = scraper.build_request(&MacroQuery::new("BCA_NGDPD")).unwrap();
        assert!(request.url.ends_with("/BCA_NGDPD"));
        assert!(request.params.is_empty());
    }

    #[test]
    fn test_keyed_source_gets_api_key_and_extras() {
        let scraper = MacroScraper::new(FRED, Some("fred-key".to_string()));
        let query = MacroQuery::new("series/observations")
            .with_param("series_id", "GDP")
            .with_param("file_type", "json");
        let request = scraper.build_request(&query).unwrap();

        assert_eq!(request.url, "https://api.stlouisfed.org/fred/series/observations");
        assert_eq!(request.params.get("api_key").map(String::as_str), Some("fred-key"));
        assert_eq!(request.params.get("series_id").map(String::as_str), Some("GDP"));
        assert_eq!(request.params.len(), 3);
    }

    #[test]
    fn test_empty_indicator_is_rejected() {
        let scraper = MacroScraper::new(IMF, None);
        assert!(matches!(
            scraper.build_request(&MacroQuery::new("  ")),
            Err(QuarryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_name_comes_from_source() {
        assert_eq!(MacroScraper::new(FRED, None).name(), "FRED");
    }
}
