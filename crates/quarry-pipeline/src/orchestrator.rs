//! Orchestration of scrape, process and forward.

use crate::{RunOutcome, ScrapeArgs, ScrapeJob};
use quarry_http::{ApiSender, CacheStore, HttpFetcher, ReqwestTransport, Settings, Transport};
use quarry_sources::{
    AssetProcessor, AssetScraper, MacroProcessor, MacroScraper, SentimentProcessor,
    SentimentScraper, registry,
};
use quarry_traits::{NormalizedRecord, Processor, RawResponse, Result, Scraper};
use serde_json::Value;
use tracing::{error, info, warn};

/// Runs scrape jobs end to end.
///
/// Each `(data_type, source)` pair resolves through the static source
/// registry to one scraper and one processor. The orchestrator owns the
/// fetcher (and with it the cache) and the API sender; scrapers and
/// processors are stateless and built per job.
#[derive(Debug, Clone)]
pub struct Orchestrator<T> {
    fetcher: HttpFetcher<T>,
    sender: ApiSender<T>,
    api_key: Option<String>,
}

impl Orchestrator<ReqwestTransport> {
    /// Create an orchestrator backed by a real HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(settings, ReqwestTransport::new()?))
    }
}

impl<T: Transport + Clone> Orchestrator<T> {
    /// Create an orchestrator sharing `transport` between fetcher and sender.
    pub fn new(settings: &Settings, transport: T) -> Self {
        Self {
            fetcher: HttpFetcher::new(
                transport.clone(),
                CacheStore::from_settings(settings),
                settings,
            ),
            sender: ApiSender::new(transport, settings),
            api_key: settings.api_key().map(str::to_string),
        }
    }

    /// The fetcher used for scraping.
    #[must_use]
    pub const fn fetcher(&self) -> &HttpFetcher<T> {
        &self.fetcher
    }

    /// Scrape and normalize one job without forwarding it.
    ///
    /// # Errors
    ///
    /// - [`QuarryError::UnsupportedSource`](quarry_traits::QuarryError::UnsupportedSource)
    ///   before any network call when the source does not serve the job's data type.
    /// - Any fetch, decode or validation error from the pipeline.
    pub async fn scrape_and_process(&self, job: &ScrapeJob) -> Result<NormalizedRecord> {
        let source = *registry::resolve(job.data_type(), &job.source)?;
        let api_key = self.api_key.clone();

        match &job.args {
            ScrapeArgs::Macro(query) => {
                let context = Context::new(source.key, "indicator", query.indicator.clone());
                self.pipeline(&MacroScraper::new(source, api_key), &MacroProcessor, query, context)
                    .await
            }
            ScrapeArgs::Asset(query) => {
                let context = Context::new(source.key, "symbol", query.joined_symbols());
                self.pipeline(&AssetScraper::new(source, api_key), &AssetProcessor, query, context)
                    .await
            }
            ScrapeArgs::Sentiment(query) => {
                let context = Context::new(source.key, "query", query.query.clone());
                self.pipeline(
                    &SentimentScraper::new(source, api_key),
                    &SentimentProcessor,
                    query,
                    context,
                )
                .await
            }
        }
    }

    /// Run a job, forwarding the record when `send_to_api` is set.
    ///
    /// # Errors
    ///
    /// Any error from [`Orchestrator::scrape_and_process`], or
    /// [`QuarryError::SendFailed`](quarry_traits::QuarryError::SendFailed)
    /// when forwarding is requested and rejected.
    pub async fn try_run(&self, job: &ScrapeJob, send_to_api: bool) -> Result<RunOutcome> {
        let record = self.scrape_and_process(job).await?;

        if send_to_api {
            self.sender.try_send(job.data_type(), &record).await?;
        }

        Ok(RunOutcome {
            record,
            sent: send_to_api,
        })
    }

    /// Run a job and report success.
    ///
    /// Never fails: every error is logged and turned into `false`.
    pub async fn run(&self, job: &ScrapeJob, send_to_api: bool) -> bool {
        match self.try_run(job, send_to_api).await {
            Ok(_) => true,
            Err(e) => {
                error!(
                    data_type = %job.data_type(),
                    source = %job.source,
                    error = %e,
                    "scrape job failed"
                );
                false
            }
        }
    }

    async fn pipeline<S, P>(
        &self,
        scraper: &S,
        processor: &P,
        query: &S::Query,
        context: Context,
    ) -> Result<NormalizedRecord>
    where
        S: Scraper,
        P: Processor,
        NormalizedRecord: From<P::Record>,
    {
        let request = scraper.build_request(query)?;
        info!(
            scraper = scraper.name(),
            processor = processor.name(),
            url = %request.url,
            "scraping"
        );

        let mut raw = self.fetcher.fetch_request(&request).await?;
        context.annotate(&mut raw);

        let record = processor.process(&raw)?;
        Ok(record.into())
    }
}

/// Call context written into a raw response before processing.
#[derive(Debug)]
struct Context {
    source: &'static str,
    field: &'static str,
    value: String,
}

impl Context {
    const fn new(source: &'static str, field: &'static str, value: String) -> Self {
        Self {
            source,
            field,
            value,
        }
    }

    /// Set `source` and fill `field` unless the response already carries it.
    fn annotate(self, raw: &mut RawResponse) {
        let Some(object) = raw.as_object_mut() else {
            warn!(source = self.source, "response is not a JSON object, skipping annotation");
            return;
        };

        object.insert("source".to_string(), Value::String(self.source.to_string()));
        if object.get(self.field).is_none_or(Value::is_null) && !self.value.is_empty() {
            object.insert(self.field.to_string(), Value::String(self.value));
        }
    }
}
