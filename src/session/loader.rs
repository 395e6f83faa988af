//! Stock loading with demo fallback
//!
//! probe -> fetch -> validate; any failure switches to synthesized data.

use crate::backend::PriceBackend;
use crate::demo::{synthesize, StockProfile};
use crate::notice::NoticeLevel;
use crate::series::{weekdays_after, DataSource, HistoricalSeries, SeriesError, HORIZON_DAYS};
use chrono::NaiveDate;
use rand::Rng;

/// History and projection axis ready to seed a session
#[derive(Debug, Clone)]
pub struct LoadedStock {
    pub profile: StockProfile,
    pub history: HistoricalSeries,
    pub projection_dates: Vec<NaiveDate>,
    /// Messages to show the user about how the data was obtained
    pub notices: Vec<(NoticeLevel, String)>,
}

impl LoadedStock {
    pub fn is_demo(&self) -> bool {
        self.history.source == DataSource::Demo
    }
}

/// Probe the backend with its short timeout
pub async fn check_backend(backend: &dyn PriceBackend) -> bool {
    match backend.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Backend probe failed");
            false
        }
    }
}

/// Load a symbol from the backend, or synthesize it
pub async fn load_stock<R: Rng + ?Sized>(
    backend: Option<&dyn PriceBackend>,
    symbol: &str,
    today: NaiveDate,
    rng: &mut R,
) -> Result<LoadedStock, SeriesError> {
    let profile = StockProfile::lookup(symbol);
    tracing::info!(symbol = %profile.symbol, "Loading stock");

    let Some(backend) = backend else {
        return load_demo(
            profile,
            today,
            rng,
            (NoticeLevel::Info, "Offline mode - using demo data".to_string()),
        );
    };

    if !check_backend(backend).await {
        return load_demo(
            profile,
            today,
            rng,
            (
                NoticeLevel::Warning,
                "Backend not running - using demo data".to_string(),
            ),
        );
    }

    let payload = match backend.fetch_history(&profile.symbol).await {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(symbol = %profile.symbol, error = %e, "Loading failed");
            return load_demo(
                profile,
                today,
                rng,
                (NoticeLevel::Error, format!("Failed to load: {}", e)),
            );
        }
    };

    let mut notices = Vec::new();
    if !payload.real {
        notices.push((
            NoticeLevel::Warning,
            "Using simulated data - market data unavailable".to_string(),
        ));
    }

    let profile = StockProfile {
        name: payload.name.unwrap_or(profile.name),
        color: payload.color.unwrap_or(profile.color),
        ..profile
    };

    tracing::info!(
        symbol = %profile.symbol,
        points = payload.series.len(),
        real = payload.real,
        "Loaded backend history"
    );

    Ok(LoadedStock {
        history: HistoricalSeries::new(
            profile.symbol.clone(),
            payload.series,
            DataSource::Backend { real: payload.real },
        ),
        projection_dates: weekdays_after(today, HORIZON_DAYS),
        profile,
        notices,
    })
}

fn load_demo<R: Rng + ?Sized>(
    profile: StockProfile,
    today: NaiveDate,
    rng: &mut R,
    notice: (NoticeLevel, String),
) -> Result<LoadedStock, SeriesError> {
    tracing::warn!(symbol = %profile.symbol, "Loading demo data");
    let demo = synthesize(&profile.symbol, today, rng)?;

    Ok(LoadedStock {
        profile: demo.profile,
        history: demo.history,
        projection_dates: demo.projection_dates,
        notices: vec![notice],
    })
}
