//! Scrape job descriptions.

use quarry_sources::{AssetQuery, MacroQuery, SentimentQuery};
use quarry_traits::{DataType, NormalizedRecord};

/// Typed call arguments; the variant determines the data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeArgs {
    /// Macroeconomic indicator query.
    Macro(MacroQuery),
    /// Asset price history query.
    Asset(AssetQuery),
    /// Sentiment search query.
    Sentiment(SentimentQuery),
}

impl ScrapeArgs {
    /// The data type these arguments scrape.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Macro(_) => DataType::Macro,
            Self::Asset(_) => DataType::Asset,
            Self::Sentiment(_) => DataType::Sentiment,
        }
    }
}

impl From<MacroQuery> for ScrapeArgs {
    fn from(query: MacroQuery) -> Self {
        Self::Macro(query)
    }
}

impl From<AssetQuery> for ScrapeArgs {
    fn from(query: AssetQuery) -> Self {
        Self::Asset(query)
    }
}

impl From<SentimentQuery> for ScrapeArgs {
    fn from(query: SentimentQuery) -> Self {
        Self::Sentiment(query)
    }
}

/// One scrape request: a source name and the arguments for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeJob {
    /// Source key or registry name (e.g. `imf`, `YAHOO_FINANCE`).
    pub source: String,
    /// Typed call arguments.
    pub args: ScrapeArgs,
}

impl ScrapeJob {
    /// Create a job for `source`.
    #[must_use]
    pub fn new(source: impl Into<String>, args: impl Into<ScrapeArgs>) -> Self {
        Self {
            source: source.into(),
            args: args.into(),
        }
    }

    /// The data type this job scrapes.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.args.data_type()
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// The normalized record.
    pub record: NormalizedRecord,
    /// Whether the record was forwarded to the API.
    pub sent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_follows_args() {
        assert_eq!(ScrapeJob::new("imf", MacroQuery::new("gdp")).data_type(), DataType::Macro);
        assert_eq!(
            ScrapeJob::new("yahoo", AssetQuery::new(["AAPL"])).data_type(),
            DataType::Asset
        );
        assert_eq!(
            ScrapeJob::new("twitter", SentimentQuery::new("oil")).data_type(),
            DataType::Sentiment
        );
    }
}
