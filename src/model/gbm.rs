//! Geometric Brownian Motion price generator
//!
//! One daily step:
//! S' = S * exp((mu - 0.5*sigma^2)*dt + sigma*sqrt(dt)*z), z ~ N(0, 1)

use super::{standard_normal, GbmParams, ModelError, PriceStep};
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Smallest representable price (one cent)
const MIN_PRICE: Decimal = dec!(0.01);

/// GBM-based next-day price generator
#[derive(Debug, Clone, Copy, Default)]
pub struct GbmModel {
    params: GbmParams,
}

impl GbmModel {
    /// Create a model with the default daily parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model with custom parameters
    pub fn with_params(params: GbmParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> GbmParams {
        self.params
    }

    /// Generate the next price from `current`
    pub fn next_price<R: Rng + ?Sized>(
        &self,
        current: Decimal,
        rng: &mut R,
    ) -> Result<PriceStep, ModelError> {
        let z = standard_normal(rng);
        self.step_with_shock(current, z)
    }

    /// Apply one step for a given standard normal draw
    pub fn step_with_shock(&self, current: Decimal, z: f64) -> Result<PriceStep, ModelError> {
        self.params.validate()?;

        let s = match current.to_f64() {
            Some(s) if current > Decimal::ZERO && s.is_finite() => s,
            _ => return Err(ModelError::InvalidPrice(current)),
        };

        let GbmParams {
            drift: mu,
            volatility: sigma,
            dt,
        } = self.params;

        let shock = sigma * dt.sqrt() * z;
        let next = s * ((mu - 0.5 * sigma * sigma) * dt + shock).exp();

        Ok(PriceStep {
            price: round_price(next),
            shock,
        })
    }
}

/// Round a raw price to cents, never below one cent
pub(crate) fn round_price(raw: f64) -> Decimal {
    Decimal::from_f64(raw)
        .map(|p| p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .filter(|p| *p >= MIN_PRICE)
        .unwrap_or(MIN_PRICE)
}
