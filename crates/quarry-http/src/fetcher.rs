//! Cached HTTP fetches with bounded, fixed-delay retries.

use crate::{
    CacheStore, Settings,
    fingerprint::fingerprint,
    transport::{HttpRequest, Transport},
};
use quarry_traits::{HttpMethod, Params, QuarryError, Result, ScrapeRequest};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Longest slice of an error body kept in diagnostics.
const ERROR_BODY_LIMIT: usize = 200;

/// Issues scrape requests through the cache and a retry loop.
///
/// A fresh cache entry short-circuits the network entirely. On a miss the
/// request is attempted up to `max_retries` times, sleeping a fixed
/// `retry_delay` between failed attempts. Transport errors and non-2xx
/// statuses are retried; a 2xx body that is not valid JSON is not.
#[derive(Debug, Clone)]
pub struct HttpFetcher<T> {
    transport: T,
    cache: CacheStore,
    max_retries: u32,
    retry_delay: Duration,
    request_timeout: Duration,
}

impl<T: Transport> HttpFetcher<T> {
    /// Create a fetcher using the retry and timeout settings.
    pub const fn new(transport: T, cache: CacheStore, settings: &Settings) -> Self {
        Self {
            transport,
            cache,
            max_retries: settings.max_retries,
            retry_delay: settings.retry_delay,
            request_timeout: settings.request_timeout,
        }
    }

    /// The cache this fetcher reads and writes.
    #[must_use]
    pub const fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Number of network attempts made on a cache miss (never less than one).
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Fetch a scraper-built request.
    ///
    /// # Errors
    ///
    /// See [`HttpFetcher::fetch`].
    pub async fn fetch_request(&self, request: &ScrapeRequest) -> Result<Value> {
        self.fetch(&request.url, &request.params, request.method)
            .await
    }

    /// Fetch `url` with `params`, returning the parsed JSON body.
    ///
    /// # Errors
    ///
    /// - [`QuarryError::FetchExhausted`] when every attempt fails, carrying the
    ///   last failure.
    /// - [`QuarryError::JsonDecode`] when a 2xx body is not valid JSON.
    pub async fn fetch(&self, url: &str, params: &Params, method: HttpMethod) -> Result<Value> {
        let key = fingerprint(url, params);

        if let Some(cached) = self.cache.get(&key) {
            debug!(url, fingerprint = %key, "returning cached data");
            return Ok(cached);
        }

        let attempts = self.max_attempts();
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            let request = HttpRequest {
                method,
                url: url.to_string(),
                query: params.clone(),
                body: None,
                bearer: None,
                timeout: self.request_timeout,
            };

            match self.transport.execute(request).await {
                Ok(response) if response.is_success() => {
                    let value: Value =
                        serde_json::from_str(&response.body).map_err(|e| QuarryError::JsonDecode {
                            url: url.to_string(),
                            reason: e.to_string(),
                        })?;
                    self.cache.put(&key, &value);
                    debug!(url, attempt, fingerprint = %key, "fetched and cached");
                    return Ok(value);
                }
                Ok(response) => {
                    last_error = format!(
                        "HTTP {}: {}",
                        response.status,
                        truncate(&response.body, ERROR_BODY_LIMIT)
                    );
                }
                Err(e) => last_error = e.to_string(),
            }

            warn!(url, attempt, attempts, error = %last_error, "fetch attempt failed");

            if attempt < attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        error!(url, attempts, "all fetch attempts failed");
        Err(QuarryError::FetchExhausted {
            url: url.to_string(),
            attempts,
            last_error,
        })
    }
}

fn truncate(text: &str, limit: usize) -> &str {
    text.char_indices()
        .nth(limit)
        .map_or(text, |(idx, _)| &text[..idx])
}
