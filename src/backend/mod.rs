//! Backend module
//!
//! Remote history and next-day simulation service. Every call can fail;
//! callers fall back to local synthesis and simulation.

mod client;
mod types;

pub use client::{BackendClient, BackendConfig, DEFAULT_BASE_URL};
pub use types::{HistoryPayload, HistoryWire, SimulateRequest, SimulateResponse, StockResponse};

use crate::model::{GbmParams, PriceStep};
use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Backend call errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// No backend configured
    #[error("Backend disabled")]
    Disabled,
    /// Request did not complete in time
    #[error("Backend request timed out")]
    Timeout,
    /// Connection or protocol failure
    #[error("Backend unreachable: {0}")]
    Transport(String),
    /// Non-2xx response
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body missing expected fields
    #[error("Invalid data format from server: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_decode() {
            BackendError::Malformed(e.to_string())
        } else {
            BackendError::Transport(e.to_string())
        }
    }
}

/// Trait for backend implementations
#[async_trait]
pub trait PriceBackend: Send + Sync {
    /// Liveness probe; any 2xx is connected
    async fn ping(&self) -> Result<(), BackendError>;
    /// Fetch and validate the historical series for a symbol
    async fn fetch_history(&self, symbol: &str) -> Result<HistoryPayload, BackendError>;
    /// Ask the backend for the next simulated price
    async fn simulate_next_day(
        &self,
        current: Decimal,
        params: &GbmParams,
    ) -> Result<PriceStep, BackendError>;
}
