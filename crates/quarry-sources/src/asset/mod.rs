//! Asset price history.

mod processor;
mod scraper;

pub use processor::AssetProcessor;
pub use scraper::{AssetQuery, AssetScraper, DEFAULT_INTERVAL};
