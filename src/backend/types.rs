//! Backend wire types

use super::BackendError;
use crate::model::{GbmParams, PriceStep};
use crate::series::PriceSeries;
use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// `status` value marking live market data
const REAL_DATA_STATUS: &str = "real_data";

/// Response of `GET /stock/{symbol}`
#[derive(Debug, Clone, Deserialize)]
pub struct StockResponse {
    pub history: Option<HistoryWire>,
    /// "real_data" or "fallback"
    #[serde(default)]
    pub status: Option<String>,
    /// Older servers send a flag instead of `status`
    #[serde(default)]
    pub is_real_data: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Raw history block
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryWire {
    #[serde(default)]
    pub dates: Vec<String>,
    pub prices: Option<Vec<f64>>,
}

/// Validated history from the backend
#[derive(Debug, Clone)]
pub struct HistoryPayload {
    pub series: PriceSeries,
    /// False when the backend served its own fallback data
    pub real: bool,
    pub name: Option<String>,
    pub color: Option<String>,
}

impl StockResponse {
    /// Validate the response into a price series
    pub fn into_payload(self) -> Result<HistoryPayload, BackendError> {
        let real = self.status.as_deref() == Some(REAL_DATA_STATUS)
            || self.is_real_data.unwrap_or(false);

        let history = self
            .history
            .ok_or_else(|| BackendError::Malformed("missing history".to_string()))?;
        let raw_prices = history
            .prices
            .ok_or_else(|| BackendError::Malformed("missing history.prices".to_string()))?;

        let dates = history
            .dates
            .iter()
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|e| BackendError::Malformed(format!("bad date {:?}: {}", d, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let prices = raw_prices
            .iter()
            .map(|p| {
                Decimal::from_f64(*p)
                    .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
                    .ok_or_else(|| BackendError::Malformed(format!("bad price {}", p)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let series =
            PriceSeries::new(dates, prices).map_err(|e| BackendError::Malformed(e.to_string()))?;

        Ok(HistoryPayload {
            series,
            real,
            name: self.name,
            color: self.color,
        })
    }
}

/// Body of `POST /simulate-next-day`
#[derive(Debug, Clone, Serialize)]
pub struct SimulateRequest {
    pub current_price: f64,
    pub mu: f64,
    pub sigma: f64,
    /// Step length in years; servers that ignore it step by 1/252
    pub dt: f64,
}

impl SimulateRequest {
    /// Request one step from `current` with the local model's parameters
    pub fn new(current: Decimal, params: &GbmParams) -> Result<Self, BackendError> {
        let current_price = current
            .to_f64()
            .ok_or_else(|| BackendError::Malformed(format!("unrepresentable price {}", current)))?;
        Ok(Self {
            current_price,
            mu: params.drift,
            sigma: params.volatility,
            dt: params.dt,
        })
    }
}

/// Response of `POST /simulate-next-day`
#[derive(Debug, Clone, Deserialize)]
pub struct SimulateResponse {
    pub new_price: f64,
    pub shock: f64,
}

impl TryFrom<SimulateResponse> for PriceStep {
    type Error = BackendError;

    fn try_from(resp: SimulateResponse) -> Result<Self, Self::Error> {
        if !resp.shock.is_finite() {
            return Err(BackendError::Malformed(format!("bad shock {}", resp.shock)));
        }
        let price = Decimal::from_f64(resp.new_price)
            .filter(|_| resp.new_price.is_finite())
            .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            .filter(|d| *d > Decimal::ZERO)
            .ok_or_else(|| BackendError::Malformed(format!("bad new_price {}", resp.new_price)))?;

        Ok(PriceStep {
            price,
            shock: resp.shock,
        })
    }
}
