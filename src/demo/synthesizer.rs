//! Synthetic history generator
//!
//! Price at calendar offset i:
//! base * (1 + 0.005*i + 0.02*sin(i/30) + 0.02*U), U ~ Uniform(0, 1)

use super::StockProfile;
use crate::model::round_price;
use crate::series::{
    trailing_weekdays, weekdays_after, DataSource, HistoricalSeries, PriceSeries, SeriesError,
    HORIZON_DAYS,
};
use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Calendar days of synthesized history
pub const HISTORY_SPAN_DAYS: usize = 365;

/// Synthesized history plus the projection date axis
#[derive(Debug, Clone)]
pub struct DemoData {
    pub profile: StockProfile,
    pub history: HistoricalSeries,
    pub projection_dates: Vec<NaiveDate>,
}

impl DemoData {
    pub fn last_real_price(&self) -> Decimal {
        self.history.last_real_price()
    }
}

/// Synthesize a demo history for `symbol` ending at `today`
pub fn synthesize<R: Rng + ?Sized>(
    symbol: &str,
    today: NaiveDate,
    rng: &mut R,
) -> Result<DemoData, SeriesError> {
    let profile = StockProfile::lookup(symbol);
    let base = profile.base_price.to_f64().unwrap_or(100.0);

    let (dates, prices): (Vec<_>, Vec<_>) = trailing_weekdays(today, HISTORY_SPAN_DAYS)
        .into_iter()
        .map(|(offset, date)| {
            let i = offset as f64;
            let noise: f64 = rng.gen();
            let raw = base * (1.0 + 0.005 * i + 0.02 * (i / 30.0).sin() + 0.02 * noise);
            (date, round_price(raw))
        })
        .unzip();

    let series = PriceSeries::new(dates, prices)?;

    tracing::debug!(
        symbol = %profile.symbol,
        points = series.len(),
        last_price = %series.last_price(),
        "Synthesized demo history"
    );

    Ok(DemoData {
        history: HistoricalSeries::new(profile.symbol.clone(), series, DataSource::Demo),
        projection_dates: weekdays_after(today, HORIZON_DAYS),
        profile,
    })
}
