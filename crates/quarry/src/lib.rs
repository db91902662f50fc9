#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarry/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # quarry
//!
//! Market data scraping pipeline.
//!
//! quarry is an umbrella crate that re-exports all quarry sub-crates for
//! convenience. It pulls macroeconomic indicators, asset price history and
//! market sentiment from external providers, normalizes them into uniform
//! records and optionally forwards them to an internal API.
//!
//! ## Quick Start
//!
//! ```ignore
//! use quarry::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> quarry::Result<()> {
//!     let settings = Settings::from_env();
//!     let orchestrator = Orchestrator::from_settings(&settings)?;
//!
//!     let job = ScrapeJob::new("yahoo", AssetQuery::new(["AAPL"]));
//!     let outcome = orchestrator.try_run(&job, false).await?;
//!     println!("{}", outcome.record.to_frame()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Shared types, records and the [`Scraper`] / [`Processor`] traits
//! - [`http`] - Settings, response cache, retrying fetcher and API sender
//! - [`sources`] - Source registry and the concrete scrapers and processors
//! - [`pipeline`] - The [`Orchestrator`]
//!
//! ## Architecture
//!
//! 1. **Scrapers** turn typed queries into requests
//! 2. **The fetcher** serves requests from the cache or the network, with retries
//! 3. **Processors** normalize raw JSON into validated records
//! 4. **The sender** forwards records to the internal API

/// Version information for the quarry crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Traits
// ============================================================================

/// Core types and trait definitions.
pub mod traits {
    pub use quarry_traits::*;
}

pub use quarry_traits::{Processor, Scraper};
pub use quarry_traits::{QuarryError, Result};
pub use quarry_traits::{DataType, NormalizedRecord};

// ============================================================================
// Request Layer
// ============================================================================

/// Settings, cache, fetcher and sender.
///
/// ```ignore
/// use quarry::http::{CacheStore, Settings};
///
/// let settings = Settings::from_env();
/// let removed = CacheStore::from_settings(&settings).prune_expired()?;
/// ```
pub mod http {
    pub use quarry_http::*;
}

pub use quarry_http::Settings;

// ============================================================================
// Sources
// ============================================================================

/// Source registry, scrapers and processors.
///
/// ## Registered Sources
///
/// | key | data type | key required |
/// |-----|-----------|--------------|
/// | `imf` | macro | no |
/// | `fred` | macro | yes |
/// | `yahoo` | asset | no |
/// | `twitter` | sentiment | yes |
/// | `newsapi` | sentiment | yes |
pub mod sources {
    pub use quarry_sources::*;
}

// ============================================================================
// Pipeline
// ============================================================================

/// Job orchestration.
pub mod pipeline {
    pub use quarry_pipeline::*;
}

pub use quarry_pipeline::{Orchestrator, ScrapeJob};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use quarry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::http::{CacheStore, Settings};
    pub use crate::pipeline::{Orchestrator, RunOutcome, ScrapeArgs, ScrapeJob};
    pub use crate::sources::{AssetQuery, MacroQuery, SentimentQuery};
    pub use crate::traits::{DataType, NormalizedRecord, Processor, Scraper};
    pub use crate::{QuarryError, Result};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_scraper<S: Scraper>(_scraper: &S) {}
        fn _accept_processor<P: Processor>(_processor: &P) {}

        _accept_scraper(&sources::MacroScraper::new(sources::registry::IMF, None));
        _accept_processor(&sources::SentimentProcessor);
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let error = QuarryError::InvalidArgument("test".to_string());
        assert_eq!(error.kind(), "invalid_argument");
    }
}
