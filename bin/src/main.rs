//! Quarry CLI binary.
//!
//! Provides the command-line interface for scraping market data.

mod cmd;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quarry_http::Settings;
use quarry_traits::QuarryError;
use std::process;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Market data scraper for macro, asset and sentiment data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape, normalize and optionally forward one data set
    Scrape(cmd::scrape::ScrapeCommand),

    /// List registered data sources
    Sources {
        /// Only show sources for this data type
        #[arg(short, long, value_enum)]
        data_type: Option<cmd::DataTypeArg>,
    },

    /// Maintain the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove entries older than CACHE_TTL
    Prune,
    /// Remove every entry
    Clear,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

async fn run() -> Result<bool> {
    let cli = Cli::parse();
    let settings = Settings::from_env();
    // held until run returns, which is before process::exit
    let _log_guard = match logging::init(&settings) {
        Ok(guard) => guard,
        Err(e) => {
            if let Commands::Scrape(command) = &cli.command {
                command.report_failure(&QuarryError::Config(format!("{e:#}")));
                return Ok(false);
            }
            return Err(e);
        }
    };

    match cli.command {
        Commands::Scrape(command) => Ok(cmd::scrape::execute(&command, &settings).await),
        Commands::Sources { data_type } => {
            cmd::sources::list_sources(data_type.map(Into::into));
            Ok(true)
        }
        Commands::Cache { action } => {
            match action {
                CacheAction::Prune => cmd::cache::prune(&settings)?,
                CacheAction::Clear => cmd::cache::clear(&settings)?,
            }
            Ok(true)
        }
    }
}
