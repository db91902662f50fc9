//! Forwarding of normalized records to the internal API.
//!
//! One `POST {API_BASE_URL}/{data_type}` per record with a bearer token.
//! There is no retry: a failed send is reported once and the caller decides
//! what to do with it.

use crate::{
    Settings,
    transport::{HttpRequest, Transport},
};
use quarry_traits::{DataType, HttpMethod, NormalizedRecord, Params, QuarryError, Result};
use std::time::Duration;
use tracing::{error, info};

/// Posts records to the internal API.
#[derive(Debug, Clone)]
pub struct ApiSender<T> {
    transport: T,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl<T: Transport> ApiSender<T> {
    /// Create a sender for `API_BASE_URL` using `API_KEY` and `API_TIMEOUT`.
    pub fn new(transport: T, settings: &Settings) -> Self {
        Self {
            transport,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key().map(str::to_string),
            timeout: settings.api_timeout,
        }
    }

    /// The endpoint records of `data_type` are posted to.
    #[must_use]
    pub fn endpoint(&self, data_type: DataType) -> String {
        format!("{}/{}", self.base_url, data_type.as_str())
    }

    /// Send a record, returning whether the API accepted it.
    ///
    /// Failures are logged, never raised.
    pub async fn send(&self, data_type: DataType, record: &NormalizedRecord) -> bool {
        match self.try_send(data_type, record).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to forward record");
                false
            }
        }
    }

    /// Send a record, reporting why it was rejected.
    ///
    /// # Errors
    ///
    /// - [`QuarryError::Config`] if `API_BASE_URL` is not an http(s) URL.
    /// - [`QuarryError::SendFailed`] on a transport error or a non-2xx status.
    pub async fn try_send(&self, data_type: DataType, record: &NormalizedRecord) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(QuarryError::Config(format!(
                "API_BASE_URL must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        let endpoint = self.endpoint(data_type);
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: endpoint.clone(),
            query: Params::new(),
            body: Some(serde_json::to_value(record)?),
            bearer: self.api_key.clone(),
            timeout: self.timeout,
        };

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| QuarryError::SendFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(QuarryError::SendFailed {
                endpoint,
                reason: format!("HTTP {}", response.status),
            });
        }

        info!(endpoint = %endpoint, "successfully sent data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReqwestTransport;
    use mockito::Matcher;
    use quarry_traits::{MacroRecord, MacroValue};
    use serde_json::json;

    fn record() -> NormalizedRecord {
        NormalizedRecord::Macro(MacroRecord {
            source: "imf".to_string(),
            indicator: Some("gdp".to_string()),
            values: vec![MacroValue {
                country: "USA".to_string(),
                value: Some(21.4),
                unit: "T".to_string(),
                date: Some("2023".to_string()),
            }],
        })
    }

    fn sender(base_url: String, api_key: &str) -> ApiSender<ReqwestTransport> {
        let settings = Settings {
            api_base_url: base_url,
            api_key: api_key.to_string(),
            ..Settings::default()
        };
        ApiSender::new(ReqwestTransport::new().unwrap(), &settings)
    }

    #[test]
    fn test_endpoint_joins_data_type() {
        let sender = sender("https://api.internal/v1/".to_string(), "");
        assert_eq!(sender.endpoint(DataType::Macro), "https://api.internal/v1/macro");
        assert_eq!(
            sender.endpoint(DataType::Sentiment),
            "https://api.internal/v1/sentiment"
        );
    }

    #[tokio::test]
    async fn test_send_posts_record_with_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/macro")
            .match_header("authorization", "Bearer secret")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({"indicator": "gdp", "source": "imf"})))
            .with_status(201)
            .expect(1)
            .create_async()
            .await;

        let sender = sender(server.url(), "secret");
        assert!(sender.send(DataType::Macro, &record()).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_failure_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/macro")
            .with_status(500)
            .expect(2)
            .create_async()
            .await;

        let sender = sender(server.url(), "secret");
        let err = sender.try_send(DataType::Macro, &record()).await.unwrap_err();
        assert!(matches!(err, QuarryError::SendFailed { .. }));
        assert!(err.to_string().contains("HTTP 500"));
        assert!(!sender.send(DataType::Macro, &record()).await);
        // one call per send, no retries
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_http_base_url_fails_on_send() {
        let sender = sender("ftp://x".to_string(), "secret");
        let err = sender.try_send(DataType::Macro, &record()).await.unwrap_err();
        assert_eq!(err.kind(), "config");
        assert_eq!(
            err.to_string(),
            "Configuration error: API_BASE_URL must be an http(s) URL, got 'ftp://x'"
        );
        assert!(!sender.send(DataType::Macro, &record()).await);
    }

    #[tokio::test]
    async fn test_transport_error_is_failure() {
        let sender = sender("http://127.0.0.1:9".to_string(), "");
        assert!(!sender.send(DataType::Macro, &record()).await);
    }
}
