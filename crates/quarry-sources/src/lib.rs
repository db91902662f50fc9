//! Concrete scrapers and processors for quarry.
//!
//! This crate provides one scraper/processor pair per data type:
//! - Macro: country-level economic indicators (IMF, FRED)
//! - Asset: OHLCV price history (Yahoo Finance)
//! - Sentiment: scored social posts and news articles (Twitter, NewsAPI)
//!
//! Scrapers only describe requests; processors only reshape JSON. Neither
//! touches the network.
//!
//! # Example
//!
//! ```ignore
//! use quarry_sources::macroeconomic::{MacroQuery, MacroScraper};
//! use quarry_sources::registry::IMF;
//! use quarry_traits::Scraper;
//!
//! let scraper = MacroScraper::new(IMF, None);
//! let request = scraper.build_request(&MacroQuery::new("gdp").with_country("USA"))?;
//! ```

pub mod asset;
mod json;
pub mod macroeconomic;
pub mod registry;
pub mod sentiment;

// Re-export key types
pub use asset::{AssetProcessor, AssetQuery, AssetScraper};
pub use macroeconomic::{MacroProcessor, MacroQuery, MacroScraper};
pub use registry::{available_sources, lookup, resolve, sources_for};
pub use sentiment::{SentimentProcessor, SentimentQuery, SentimentScraper};
