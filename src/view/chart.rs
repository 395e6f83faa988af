//! Chart series for the renderer

use crate::series::{HistoricalSeries, ProjectionSeries};
use crate::session::SimulationState;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Two aligned series over history dates followed by projection dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<NaiveDate>,
    /// History prices, `None` over the projection range
    pub historical: Vec<Option<Decimal>>,
    /// Simulated prefix of the projection, `None` elsewhere
    pub projection: Vec<Option<Decimal>>,
}

impl ChartData {
    pub fn build(
        history: &HistoricalSeries,
        projection: &ProjectionSeries,
        state: &SimulationState,
    ) -> Self {
        let hist_len = history.series.len();
        let proj_len = projection.dates().len();

        let labels = history
            .series
            .dates()
            .iter()
            .chain(projection.dates())
            .copied()
            .collect();

        let historical = history
            .series
            .prices()
            .iter()
            .copied()
            .map(Some)
            .chain(std::iter::repeat(None).take(proj_len))
            .collect();

        let filled = state.current_day.min(proj_len);
        let projection = std::iter::repeat(None)
            .take(hist_len)
            .chain(projection.prices().iter().take(filled).copied())
            .chain(std::iter::repeat(None).take(proj_len - filled))
            .collect();

        Self {
            labels,
            historical,
            projection,
        }
    }
}

/// Chart timeframe selection; affects axis granularity only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "other")]
    Other,
}

/// Axis tick unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Month,
    Week,
    Day,
}

impl Timeframe {
    pub fn time_unit(self) -> TimeUnit {
        match self {
            Timeframe::OneYear => TimeUnit::Month,
            Timeframe::OneMonth => TimeUnit::Week,
            Timeframe::Other => TimeUnit::Day,
        }
    }
}

impl FromStr for Timeframe {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "1Y" => Timeframe::OneYear,
            "1M" => Timeframe::OneMonth,
            _ => Timeframe::Other,
        })
    }
}
