//! CLI subcommand modules.
//!
//! This module contains the implementations for all quarry CLI subcommands.

pub(crate) mod cache;
pub(crate) mod scrape;
pub(crate) mod sources;

use clap::ValueEnum;
use quarry_traits::DataType;

/// Data type as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DataTypeArg {
    /// Macroeconomic indicators
    Macro,
    /// Asset price history
    Asset,
    /// Market sentiment
    Sentiment,
}

impl From<DataTypeArg> for DataType {
    fn from(arg: DataTypeArg) -> Self {
        match arg {
            DataTypeArg::Macro => Self::Macro,
            DataTypeArg::Asset => Self::Asset,
            DataTypeArg::Sentiment => Self::Sentiment,
        }
    }
}
