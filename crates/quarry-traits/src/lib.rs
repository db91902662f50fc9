#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarry/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the quarry market-data scraper.
//!
//! This crate provides the shared vocabulary of the scrape pipeline: data
//! types, source descriptors, request descriptions, normalized record shapes
//! and the [`Scraper`] / [`Processor`] traits each source implements.

/// The version of the quarry-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod processor;
pub mod record;
pub mod scraper;
pub mod types;

pub use error::{QuarryError, Result};
pub use processor::Processor;
pub use record::{
    AssetRecord, MacroRecord, MacroValue, NormalizedRecord, PricePoint, SentimentItem,
    SentimentRecord,
};
pub use scraper::Scraper;
pub use types::{DataType, HttpMethod, Params, RawResponse, ScrapeRequest, SourceDescriptor};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
