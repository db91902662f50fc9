//! Pipeline orchestration for quarry.
//!
//! This crate wires the pieces together:
//! - [`ScrapeJob`]: what to scrape (source name plus typed arguments)
//! - [`Orchestrator`]: resolves the job against the source registry, runs
//!   scrape then process, and optionally forwards the record to the API
//!
//! # Example
//!
//! ```ignore
//! use quarry_http::Settings;
//! use quarry_pipeline::{Orchestrator, ScrapeJob};
//! use quarry_sources::MacroQuery;
//!
//! let settings = Settings::from_env();
//! let orchestrator = Orchestrator::from_settings(&settings)?;
//!
//! let job = ScrapeJob::new("imf", MacroQuery::new("gdp").with_country("USA"));
//! let ok = orchestrator.run(&job, false).await;
//! ```

mod job;
mod orchestrator;

pub use job::{RunOutcome, ScrapeArgs, ScrapeJob};
pub use orchestrator::Orchestrator;
