//! Series types

use super::HORIZON_DAYS;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Series construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    /// Dates and prices differ in length
    #[error("Length mismatch: {dates} dates, {prices} prices")]
    LengthMismatch { dates: usize, prices: usize },
    /// A series needs at least one point
    #[error("Series is empty")]
    Empty,
    /// Dates must be strictly increasing
    #[error("Dates not strictly increasing at index {0}")]
    UnorderedDates(usize),
    /// Prices must be strictly positive
    #[error("Non-positive price {price} at index {index}")]
    NonPositivePrice { index: usize, price: Decimal },
}

/// Ordered (date, price) pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<Decimal>,
}

/// Unchecked wire form; deserialization goes through `PriceSeries::new`
#[derive(Deserialize)]
struct RawPriceSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<Decimal>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = SeriesError;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        Self::new(raw.dates, raw.prices)
    }
}

impl PriceSeries {
    /// Build a series, checking length, ordering and positivity
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<Decimal>) -> Result<Self, SeriesError> {
        if dates.len() != prices.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                prices: prices.len(),
            });
        }
        if dates.is_empty() {
            return Err(SeriesError::Empty);
        }
        if let Some(i) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(SeriesError::UnorderedDates(i + 1));
        }
        if let Some((index, price)) = prices.iter().enumerate().find(|(_, p)| **p <= Decimal::ZERO)
        {
            return Err(SeriesError::NonPositivePrice {
                index,
                price: *price,
            });
        }
        Ok(Self { dates, prices })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Most recent price
    pub fn last_price(&self) -> Decimal {
        // Non-empty by construction
        self.prices[self.prices.len() - 1]
    }
}

/// Where a historical series came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Served by the backend; `real` is false when it used its own fallback
    Backend { real: bool },
    /// Synthesized locally
    Demo,
}

/// Past prices for a symbol, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub symbol: String,
    pub series: PriceSeries,
    pub source: DataSource,
}

impl HistoricalSeries {
    pub fn new(symbol: impl Into<String>, series: PriceSeries, source: DataSource) -> Self {
        Self {
            symbol: symbol.into(),
            series,
            source,
        }
    }

    /// Anchor price for the projection
    pub fn last_real_price(&self) -> Decimal {
        self.series.last_price()
    }
}

/// Fixed-horizon projection filled strictly left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<Option<Decimal>>,
}

impl ProjectionSeries {
    /// Empty projection over the given date axis
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            prices: vec![None; HORIZON_DAYS],
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn prices(&self) -> &[Option<Decimal>] {
        &self.prices
    }

    /// Price at `index`, if simulated
    pub fn get(&self, index: usize) -> Option<Decimal> {
        self.prices.get(index).copied().flatten()
    }

    /// Date at `index` on the projection axis
    pub fn date(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    /// Number of filled entries
    pub fn filled(&self) -> usize {
        self.prices.iter().take_while(|p| p.is_some()).count()
    }

    /// Filled prefix as plain prices
    pub fn filled_prices(&self) -> Vec<Decimal> {
        self.prices.iter().map_while(|p| *p).collect()
    }

    /// Set the next unfilled entry; returns its index, or `None` at the horizon
    pub(crate) fn push(&mut self, price: Decimal) -> Option<usize> {
        let index = self.filled();
        let slot = self.prices.get_mut(index)?;
        *slot = Some(price);
        Some(index)
    }
}
