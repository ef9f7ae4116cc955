//! reqwest-based rate provider.

use std::time::Duration;

use abacus_core::currency::{RateProvider, RateTable, RatesDocument, RefreshError};
use abacus_shared::CurrencyCode;
use abacus_shared::config::RatesConfig;
use tracing::debug;

const USER_AGENT: &str = concat!("abacus/", env!("CARGO_PKG_VERSION"));

/// Client for the latest-rates endpoint.
#[derive(Debug, Clone)]
pub struct ExchangeRateApiClient {
    http: reqwest::Client,
    api_url: String,
    timeout: Duration,
}

impl ExchangeRateApiClient {
    /// Creates a client for `api_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the HTTP client cannot be initialised.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, RefreshError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RefreshError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            timeout,
        })
    }

    /// Creates a client from the `[rates]` configuration section.
    ///
    /// # Errors
    ///
    /// Same as [`ExchangeRateApiClient::new`].
    pub fn from_config(config: &RatesConfig) -> Result<Self, RefreshError> {
        Self::new(config.api_url.clone(), config.timeout())
    }

    /// Endpoint for rates quoted against `base`.
    #[must_use]
    pub fn url_for(&self, base: &CurrencyCode) -> String {
        format!("{}/{base}", self.api_url.trim_end_matches('/'))
    }

    fn classify(&self, err: &reqwest::Error) -> RefreshError {
        if err.is_timeout() {
            RefreshError::Timeout(self.timeout)
        } else if err.is_decode() {
            RefreshError::invalid_response(err.to_string())
        } else {
            RefreshError::network(err.to_string())
        }
    }
}

impl RateProvider for ExchangeRateApiClient {
    async fn fetch_latest(&self, base: &CurrencyCode) -> Result<RateTable, RefreshError> {
        let url = self.url_for(base);
        debug!(%url, "Fetching exchange rates");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::network(format!(
                "rate provider returned {status}"
            )));
        }

        let body = response.bytes().await.map_err(|e| self.classify(&e))?;
        decode_rates(&body, base)
    }
}

/// Parse a provider response body into a rate table for `base`.
///
/// # Errors
///
/// Returns `InvalidResponse` if the body is not a valid rates document.
pub fn decode_rates(body: &[u8], base: &CurrencyCode) -> Result<RateTable, RefreshError> {
    serde_json::from_slice::<RatesDocument>(body)
        .map_err(|e| RefreshError::invalid_response(format!("malformed rates document: {e}")))?
        .into_table(base)
}
