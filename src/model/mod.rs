//! Price model module
//!
//! Generates simulated next-day prices using GBM

mod gbm;
mod normal;

pub(crate) use gbm::round_price;
pub use gbm::GbmModel;
pub use normal::standard_normal;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trading days per year used to derive the daily time step
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default annualized drift
pub const DEFAULT_DRIFT: f64 = 0.10;

/// Default annualized volatility
pub const DEFAULT_VOLATILITY: f64 = 0.20;

/// GBM parameters for a daily step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GbmParams {
    /// Annualized drift (mu)
    pub drift: f64,
    /// Annualized volatility (sigma)
    pub volatility: f64,
    /// Step length in years (dt)
    pub dt: f64,
}

impl GbmParams {
    /// Daily-step parameters for the given trading calendar
    pub fn daily(drift: f64, volatility: f64, trading_days_per_year: f64) -> Self {
        Self {
            drift,
            volatility,
            dt: 1.0 / trading_days_per_year,
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        let finite = self.drift.is_finite() && self.volatility.is_finite() && self.dt.is_finite();
        if !finite || self.volatility < 0.0 || self.dt <= 0.0 {
            return Err(ModelError::InvalidParams(*self));
        }
        Ok(())
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self::daily(DEFAULT_DRIFT, DEFAULT_VOLATILITY, TRADING_DAYS_PER_YEAR)
    }
}

/// One simulated step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStep {
    /// New price, rounded to cents
    pub price: Decimal,
    /// Random perturbation applied in this step (unrounded)
    pub shock: f64,
}

/// Price model errors
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// Current price must be strictly positive
    #[error("Invalid current price: {0}")]
    InvalidPrice(Decimal),
    /// GBM parameters must be finite with positive dt
    #[error("Invalid GBM parameters: {0:?}")]
    InvalidParams(GbmParams),
}
