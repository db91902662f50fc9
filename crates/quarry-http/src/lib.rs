//! Request layer for quarry.
//!
//! This crate owns everything between a scraper's request description and
//! the network: environment settings, request fingerprints, the on-disk
//! response cache, the retrying fetcher and the API forwarder.
//!
//! # Usage
//!
//! ```rust,ignore
//! use quarry_http::{CacheStore, HttpFetcher, ReqwestTransport, Settings};
//! use quarry_traits::{HttpMethod, Params};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env();
//!     let fetcher = HttpFetcher::new(
//!         ReqwestTransport::new()?,
//!         CacheStore::from_settings(&settings),
//!         &settings,
//!     );
//!
//!     let body = fetcher
//!         .fetch("https://www.imf.org/external/datamapper/api/v1/NGDPD", &Params::new(), HttpMethod::Get)
//!         .await?;
//!     println!("{body}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! See [`Settings`] for the full list. The most relevant ones:
//!
//! ```bash
//! API_BASE_URL=https://your-api.example.com
//! API_KEY=your_api_key_here
//! MAX_RETRIES=3
//! RETRY_DELAY=5
//! CACHE_TTL=3600
//! ```

mod cache;
mod config;
mod fetcher;
mod fingerprint;
mod sender;
mod transport;

pub use cache::{CacheStore, is_fresh};
pub use config::{DEFAULT_API_BASE_URL, Settings};
pub use fetcher::HttpFetcher;
pub use fingerprint::fingerprint;
pub use sender::ApiSender;
pub use transport::{
    HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError, USER_AGENT,
};
