//! Macroeconomic indicators.
//!
//! Country-level series such as GDP, inflation and unemployment, keyed by
//! country code in the provider response.

mod processor;
mod scraper;

pub use processor::MacroProcessor;
pub use scraper::{MacroQuery, MacroScraper};
