//! Environment-sourced settings.
//!
//! [`Settings`] is built once at process start and handed by reference to
//! every component that needs it. There is no global instance.

use std::{path::PathBuf, time::Duration};

/// Default base URL of the internal API.
pub const DEFAULT_API_BASE_URL: &str = "https://your-api.example.com";

/// Runtime configuration for the scrape pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the internal API records are forwarded to.
    pub api_base_url: String,
    /// Bearer token for the internal API, also injected into sources that require a key.
    pub api_key: String,
    /// Timeout for forwarding a record.
    pub api_timeout: Duration,
    /// Timeout for each scrape attempt.
    pub request_timeout: Duration,
    /// Attempts per fetch.
    pub max_retries: u32,
    /// Fixed pause between failed attempts.
    pub retry_delay: Duration,
    /// Directory holding cached responses.
    pub cache_dir: PathBuf,
    /// Maximum age of a usable cache entry.
    pub cache_ttl: Duration,
    /// Log filter directive (e.g. `INFO`, `quarry=debug`).
    pub log_level: String,
    /// Log output shape (`pretty`, `json` or `compact`).
    pub log_format: String,
    /// File that receives a copy of every log line, if any.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            api_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
            max_retries: 3,
            retry_delay: Duration::from_secs(5),
            cache_dir: PathBuf::from("cache"),
            cache_ttl: Duration::from_secs(3600),
            log_level: "INFO".to_string(),
            log_format: "pretty".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Unset or unparseable numeric values fall back to their defaults.
    /// `API_BASE_URL` is taken as given and only checked when a record is sent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map_or(default, Duration::from_secs)
        };

        let path = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        Self {
            api_base_url: lookup("API_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            api_key: lookup("API_KEY").unwrap_or(defaults.api_key),
            api_timeout: secs("API_TIMEOUT", defaults.api_timeout),
            request_timeout: secs("REQUEST_TIMEOUT", defaults.request_timeout),
            max_retries: lookup("MAX_RETRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_retries),
            retry_delay: secs("RETRY_DELAY", defaults.retry_delay),
            cache_dir: path("CACHE_DIR").unwrap_or(defaults.cache_dir),
            cache_ttl: secs("CACHE_TTL", defaults.cache_ttl),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT").unwrap_or(defaults.log_format),
            log_file: path("LOG_FILE"),
        }
    }

    /// The configured API key, or `None` when it is empty.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        Some(self.api_key.as_str()).filter(|k| !k.is_empty())
    }
}
