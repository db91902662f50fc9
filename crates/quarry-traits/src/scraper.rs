//! Scraper trait for turning call arguments into outbound requests.
//!
//! A scraper is a pure transformation: given its [`SourceDescriptor`] and a
//! domain-specific query, it produces the URL, query parameters and verb of
//! one HTTP call. Issuing that call (with caching and retries) is the HTTP
//! layer's job, so scrapers stay trivially testable.

use crate::{Result, ScrapeRequest, SourceDescriptor};

/// Builds source-specific requests from domain-specific queries.
///
/// # Example
///
/// ```no_run
/// use quarry_traits::{Params, Result, ScrapeRequest, Scraper, SourceDescriptor};
///
/// struct PingScraper {
///     source: SourceDescriptor,
/// }
///
/// impl Scraper for PingScraper {
///     type Query = ();
///
///     fn source(&self) -> &SourceDescriptor {
///         &self.source
///     }
///
///     fn build_request(&self, _query: &()) -> Result<ScrapeRequest> {
///         Ok(ScrapeRequest::get(self.source.url("ping"), Params::new()))
///     }
/// }
/// ```
pub trait Scraper: Send + Sync {
    /// The call arguments this scraper understands.
    type Query;

    /// The descriptor of the source this scraper talks to.
    fn source(&self) -> &SourceDescriptor;

    /// Resolve a query into a concrete request.
    ///
    /// # Errors
    ///
    /// Returns [`crate::QuarryError::InvalidArgument`] when the query is
    /// unusable (for example an empty symbol). No check is made that the
    /// resolved endpoint exists; an unknown endpoint surfaces as an HTTP
    /// error status at fetch time.
    fn build_request(&self, query: &Self::Query) -> Result<ScrapeRequest>;

    /// Returns the name of this scraper, used in logs.
    fn name(&self) -> &str {
        self.source().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataType, HttpMethod, Params};

    struct EchoScraper {
        source: SourceDescriptor,
    }

    impl Scraper for EchoScraper {
        type Query = String;

        fn source(&self) -> &SourceDescriptor {
            &self.source
        }

        fn build_request(&self, query: &String) -> Result<ScrapeRequest> {
            let mut params = Params::new();
            params.insert("q".to_string(), query.clone());
            Ok(ScrapeRequest::get(self.source.url("echo"), params))
        }
    }

    fn echo() -> EchoScraper {
        EchoScraper {
            source: SourceDescriptor {
                key: "echo",
                name: "ECHO",
                data_type: DataType::Sentiment,
                base_url: "https://echo.test/",
                endpoints: &[],
                api_key_required: false,
            },
        }
    }

    #[test]
    fn test_default_name_is_registry_name() {
        assert_eq!(echo().name(), "ECHO");
    }

    #[test]
    fn test_build_request() {
        let request = echo().build_request(&"oil".to_string()).unwrap();
        assert_eq!(request.url, "https://echo.test/echo");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.params.get("q").map(String::as_str), Some("oil"));
    }

    #[test]
    fn test_scraper_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EchoScraper>();
    }
}
