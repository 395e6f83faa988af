//! HTTP backend client
//!
//! Talks to the projection backend:
//! - `GET /` liveness probe
//! - `GET /stock/{symbol}` one year of history
//! - `POST /simulate-next-day` one GBM step

use super::{
    BackendError, HistoryPayload, PriceBackend, SimulateRequest, SimulateResponse, StockResponse,
};
use crate::model::{GbmParams, PriceStep};
use async_trait::async_trait;
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Timeout for the liveness probe
    pub probe_timeout: Duration,
    /// Timeout for data requests
    pub request_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            probe_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the projection backend
pub struct BackendClient {
    config: BackendConfig,
    client: Client,
}

impl BackendClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, BackendError> {
        Self::with_config(BackendConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(mut config: BackendConfig) -> Result<Self, BackendError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Turn non-2xx responses into `BackendError::Status`
    async fn check_status(response: Response) -> Result<Response, BackendError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Status { status, body })
    }
}

#[async_trait]
impl PriceBackend for BackendClient {
    async fn ping(&self) -> Result<(), BackendError> {
        let url = self.url("/");
        tracing::debug!(url = %url, "Probing backend");

        let response = self
            .client
            .get(&url)
            .timeout(self.config.probe_timeout)
            .send()
            .await?;
        Self::check_status(response).await?;

        tracing::info!(url = %self.config.base_url, "Backend connected");
        Ok(())
    }

    async fn fetch_history(&self, symbol: &str) -> Result<HistoryPayload, BackendError> {
        let url = self.url(&format!("/stock/{}", symbol));
        let started = std::time::Instant::now();

        let response = self.client.get(&url).send().await?;
        let body: StockResponse = Self::check_status(response).await?.json().await?;
        let payload = body.into_payload()?;

        tracing::debug!(
            symbol,
            points = payload.series.len(),
            real = payload.real,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched history"
        );
        Ok(payload)
    }

    async fn simulate_next_day(
        &self,
        current: Decimal,
        params: &GbmParams,
    ) -> Result<PriceStep, BackendError> {
        let request = SimulateRequest::new(current, params)?;

        let response = self
            .client
            .post(self.url("/simulate-next-day"))
            .json(&request)
            .send()
            .await?;
        let body: SimulateResponse = Self::check_status(response).await?.json().await?;

        PriceStep::try_from(body)
    }
}
