//! Derived view module
//!
//! Display-ready aggregates computed from session state. Pure functions; the
//! renderer calls them after every state change.

mod chart;

pub use chart::{ChartData, TimeUnit, Timeframe};

use crate::series::{HistoricalSeries, ProjectionSeries, HORIZON_DAYS};
use crate::session::SimulationState;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Projection direction relative to the last historical price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Dashboard stat block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub current_price: Decimal,
    pub previous_price: Decimal,
    /// Day-over-day change in percent, 2 dp
    pub daily_change_pct: Decimal,
    /// Change since the last real price in percent, 2 dp
    pub total_change_pct: Decimal,
    pub current_day: usize,
    pub day_label: String,
    pub trend: Trend,
}

impl DashboardView {
    pub fn project(
        history: &HistoricalSeries,
        projection: &ProjectionSeries,
        state: &SimulationState,
    ) -> Self {
        let anchor = state.last_real_price;
        let day = state.current_day;

        let current_price = match day {
            0 => anchor,
            d => projection.get(d - 1).unwrap_or(anchor),
        };
        // Day 1 compares against the anchor
        let previous_price = match day {
            0 | 1 => anchor,
            d => projection.get(d - 2).unwrap_or(anchor),
        };

        let latest_real = history.last_real_price();
        let trend = if current_price >= latest_real {
            Trend::Up
        } else {
            Trend::Down
        };

        Self {
            current_price,
            previous_price,
            daily_change_pct: percent_change(previous_price, current_price),
            total_change_pct: percent_change(anchor, current_price),
            current_day: day,
            day_label: format!("Day {}/{}", day, HORIZON_DAYS),
            trend,
        }
    }

    /// Daily change formatted with an explicit sign, e.g. "+2.00%"
    pub fn daily_change_label(&self) -> String {
        signed_pct(self.daily_change_pct)
    }

    pub fn total_change_label(&self) -> String {
        signed_pct(self.total_change_pct)
    }
}

/// (to - from) / from * 100, rounded to 2 dp; zero when `from` is zero
pub fn percent_change(from: Decimal, to: Decimal) -> Decimal {
    (to - from)
        .checked_div(from)
        .map(|r| r * Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn signed_pct(pct: Decimal) -> String {
    if pct >= Decimal::ZERO {
        format!("+{:.2}%", pct)
    } else {
        format!("{:.2}%", pct)
    }
}
