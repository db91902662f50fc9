//! Market sentiment from social posts and news articles.
//!
//! Items are scored with a small keyword lexicon; see [`score`].

mod lexicon;
mod processor;
mod scraper;

pub use lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS, score};
pub use processor::SentimentProcessor;
pub use scraper::{DEFAULT_LIMIT, SentimentQuery, SentimentScraper};
