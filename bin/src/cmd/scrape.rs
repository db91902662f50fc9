//! Scrape command implementation.

use super::DataTypeArg;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::{Args, ValueEnum};
use quarry_http::Settings;
use quarry_pipeline::{Orchestrator, RunOutcome, ScrapeJob};
use quarry_sources::{AssetQuery, MacroQuery, SentimentQuery, asset::DEFAULT_INTERVAL};
use quarry_traits::{DataType, QuarryError, Result};
use serde_json::{Value, json};
use tracing::error;

/// Days of asset history fetched when no window is given.
const DEFAULT_ASSET_DAYS: u32 = 30;

/// How the record is printed on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// JSON result object
    #[default]
    Json,
    /// Polars table of the record
    Table,
}

/// Arguments of `quarry scrape`.
#[derive(Debug, Args)]
pub(crate) struct ScrapeCommand {
    /// Type of data to scrape
    #[arg(long, value_enum)]
    data_type: DataTypeArg,

    /// Data source to scrape from (e.g. imf, yahoo, twitter)
    #[arg(long)]
    source: String,

    /// Economic indicator (e.g. gdp, inflation) [macro]
    #[arg(long)]
    indicator: Option<String>,

    /// Country code [macro]
    #[arg(long)]
    country: Option<String>,

    /// Extra provider parameter as key=value, repeatable [macro]
    #[arg(long = "param", value_parser = parse_key_value)]
    params: Vec<(String, String)>,

    /// Asset symbol(s), comma separated [asset]
    #[arg(long, value_delimiter = ',')]
    symbol: Vec<String>,

    /// Bar interval [asset]
    #[arg(long, default_value = DEFAULT_INTERVAL)]
    interval: String,

    /// Search query [sentiment]
    #[arg(long)]
    query: Option<String>,

    /// Maximum number of results [sentiment]
    #[arg(long, default_value_t = quarry_sources::sentiment::DEFAULT_LIMIT)]
    limit: u32,

    /// Days of history ending at --end or now [asset: default 30, sentiment]
    #[arg(long)]
    days: Option<u32>,

    /// Window start (YYYY-MM-DD) [asset, sentiment]
    #[arg(long)]
    start: Option<String>,

    /// Window end (YYYY-MM-DD) [asset, sentiment]
    #[arg(long)]
    end: Option<String>,

    /// Do not forward the record to the API
    #[arg(long)]
    no_api: bool,

    /// Output format for the record
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

impl ScrapeCommand {
    fn data_type(&self) -> DataType {
        self.data_type.into()
    }

    /// Turn the flags into a job, resolving relative windows against `now`.
    fn job(&self, now: DateTime<Utc>) -> Result<ScrapeJob> {
        let job = match self.data_type() {
            DataType::Macro => {
                let indicator = required(self.indicator.as_deref(), "--indicator", "macro")?;
                if self.start.is_some() || self.end.is_some() || self.days.is_some() {
                    return Err(QuarryError::InvalidArgument(
                        "--start, --end and --days do not apply to macro data".to_string(),
                    ));
                }
                let mut query = MacroQuery::new(indicator);
                query.country.clone_from(&self.country);
                query.extra.extend(self.params.iter().cloned());
                ScrapeJob::new(&self.source, query)
            }
            DataType::Asset => {
                if self.symbol.iter().all(|s| s.trim().is_empty()) {
                    return Err(missing("--symbol", "asset"));
                }
                let (start, end) = self.window(now, Some(DEFAULT_ASSET_DAYS))?;
                let mut query = AssetQuery::new(self.symbol.iter().cloned())
                    .with_interval(&self.interval);
                query.start = start;
                query.end = end;
                ScrapeJob::new(&self.source, query)
            }
            DataType::Sentiment => {
                let text = required(self.query.as_deref(), "--query", "sentiment")?;
                let (start, end) = self.window(now, None)?;
                let mut query = SentimentQuery::new(text).with_limit(self.limit);
                query.start = start;
                query.end = end;
                ScrapeJob::new(&self.source, query)
            }
        };
        Ok(job)
    }

    /// Resolve `--start`/`--end`/`--days` into an optional window.
    ///
    /// With no flags and no default the window is open. Otherwise the end
    /// defaults to `now` and the start to `end - days`.
    fn window(
        &self,
        now: DateTime<Utc>,
        default_days: Option<u32>,
    ) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        let start = self.start.as_deref().map(start_of_day).transpose()?;
        let end = self.end.as_deref().map(end_of_day).transpose()?;
        let days = self.days.or(default_days);

        if start.is_none() && end.is_none() && days.is_none() {
            return Ok((None, None));
        }

        let end = end.unwrap_or(now);
        let start = match (start, days) {
            (Some(start), _) => Some(start),
            (None, Some(d)) => Some(days_before(end, d)?),
            (None, None) => None,
        };

        if let Some(start) = start
            && start > end
        {
            return Err(QuarryError::InvalidArgument(format!(
                "--start {} is after --end {}",
                start.date_naive(),
                end.date_naive()
            )));
        }

        Ok((start, Some(end)))
    }

    /// JSON object printed to stderr when the scrape fails.
    fn diagnostic(&self, error: &QuarryError) -> Value {
        json!({
            "success": false,
            "error": error.to_string(),
            "kind": error.kind(),
            "data_type": self.data_type().as_str(),
            "source": self.source,
        })
    }

    /// Log `error` and print its diagnostic to stderr.
    pub(crate) fn report_failure(&self, error: &QuarryError) {
        error!(
            data_type = %self.data_type(),
            source = %self.source,
            error = %error,
            "scraping job failed"
        );
        eprintln!("{}", self.diagnostic(error));
    }
}

/// Run the scrape, printing a JSON result and reporting success.
pub(crate) async fn execute(command: &ScrapeCommand, settings: &Settings) -> bool {
    let data_type = command.data_type();
    let send_to_api = !command.no_api;

    let result = async {
        let job = command.job(Utc::now())?;
        let orchestrator = Orchestrator::from_settings(settings)?;
        let outcome = orchestrator.try_run(&job, send_to_api).await?;
        render(data_type, &command.source, &outcome, command.format)
    }
    .await;

    match result {
        Ok(output) => {
            println!("{output}");
            true
        }
        Err(e) => {
            command.report_failure(&e);
            false
        }
    }
}

fn render(
    data_type: DataType,
    source: &str,
    outcome: &RunOutcome,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let result = json!({
                "success": true,
                "data_type": data_type.as_str(),
                "source": source,
                "sent": outcome.sent,
                "record": outcome.record,
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
        OutputFormat::Table => Ok(outcome.record.to_frame()?.to_string()),
    }
}

/// `end` minus `days` whole days, rejecting windows chrono cannot represent.
fn days_before(end: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>> {
    Duration::try_days(i64::from(days))
        .and_then(|delta| end.checked_sub_signed(delta))
        .ok_or_else(|| QuarryError::InvalidArgument(format!("--days {days} is out of range")))
}

fn required<'a>(value: Option<&'a str>, flag: &str, data_type: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| missing(flag, data_type))
}

fn missing(flag: &str, data_type: &str) -> QuarryError {
    QuarryError::InvalidArgument(format!("{flag} is required for {data_type} data"))
}

/// Parse a date in YYYY-MM-DD format.
fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| QuarryError::InvalidArgument(format!("invalid date {date_str:?}: {e}")))
}

fn start_of_day(date_str: &str) -> Result<DateTime<Utc>> {
    Ok(parse_date(date_str)?.and_time(NaiveTime::MIN).and_utc())
}

fn end_of_day(date_str: &str) -> Result<DateTime<Utc>> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    Ok(parse_date(date_str)?.and_time(last_second).and_utc())
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {s:?}"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in {s:?}"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
