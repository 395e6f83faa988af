//! Price series module
//!
//! Historical and projected price series plus the weekday calendar

mod calendar;
mod types;

pub use calendar::{is_weekend, trailing_weekdays, weekdays_after};
pub use types::{DataSource, HistoricalSeries, PriceSeries, ProjectionSeries, SeriesError};

/// Projection horizon in simulated trading-calendar days
pub const HORIZON_DAYS: usize = 365;
