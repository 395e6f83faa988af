//! Integration tests for the projection session

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use stock_projection::backend::{BackendError, HistoryPayload, PriceBackend};
use stock_projection::model::{GbmModel, GbmParams, PriceStep};
use stock_projection::news::Sentiment;
use stock_projection::series::{weekdays_after, DataSource, HistoricalSeries, PriceSeries, HORIZON_DAYS};
use stock_projection::session::{
    load_stock, AdvanceOutcome, Phase, PriceResolver, PriceSource, SessionSettings,
    SimulationSession, PROJECTION_EXHAUSTED,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

async fn demo_session(symbol: &str, seed: u64, settings: &SessionSettings) -> SimulationSession {
    let mut rng = StdRng::seed_from_u64(seed);
    let loaded = load_stock(None, symbol, today(), &mut rng).await.unwrap();
    SimulationSession::new(
        loaded,
        PriceResolver::local_only(GbmModel::with_params(settings.gbm)),
        settings,
        rng,
    )
}

/// Serves a fixed next-day step and counts calls
struct ScriptedBackend {
    step: Option<PriceStep>,
    calls: AtomicUsize,
}

#[async_trait]
impl PriceBackend for ScriptedBackend {
    async fn ping(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn fetch_history(&self, _symbol: &str) -> Result<HistoryPayload, BackendError> {
        Err(BackendError::Timeout)
    }

    async fn simulate_next_day(
        &self,
        _current: Decimal,
        _params: &GbmParams,
    ) -> Result<PriceStep, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.step
            .ok_or_else(|| BackendError::Transport("connection refused".to_string()))
    }
}

fn anchored(last: Decimal) -> stock_projection::session::LoadedStock {
    stock_projection::session::LoadedStock {
        profile: stock_projection::demo::StockProfile::lookup("AAPL"),
        history: HistoricalSeries::new(
            "AAPL",
            PriceSeries::new(vec![today()], vec![last]).unwrap(),
            DataSource::Backend { real: true },
        ),
        projection_dates: weekdays_after(today(), HORIZON_DAYS),
        notices: Vec::new(),
    }
}

#[tokio::test]
async fn test_full_horizon_then_exhausted() {
    let settings = SessionSettings::default();
    let mut session = demo_session("AAPL", 1, &settings).await;

    for _ in 0..HORIZON_DAYS {
        let outcome = session.advance_day().await.unwrap();
        assert!(matches!(outcome, AdvanceOutcome::Advanced { .. }));
    }

    let state = session.state();
    assert_eq!(state.current_day, HORIZON_DAYS);
    assert_eq!(state.phase(), Phase::Complete);
    assert_eq!(session.projection().prices().len(), HORIZON_DAYS);
    assert!(session.projection().prices().iter().all(|p| p.is_some()));
    assert!(session.projection().get(HORIZON_DAYS).is_none());

    // One more is a no-op with a terminal notice
    let before = session.projection().clone();
    let outcome = session.advance_day().await.unwrap();
    assert_eq!(outcome, AdvanceOutcome::Exhausted);
    assert_eq!(session.state(), state);
    assert_eq!(session.projection(), &before);
    assert!(session
        .notices()
        .all()
        .iter()
        .any(|n| n.message == PROJECTION_EXHAUSTED));
}

#[tokio::test]
async fn test_remote_step_scenario() {
    let backend = Arc::new(ScriptedBackend {
        step: Some(PriceStep {
            price: dec!(178.50),
            shock: 0.02,
        }),
        calls: AtomicUsize::new(0),
    });
    let settings = SessionSettings {
        news_probability: 1.0,
        ..Default::default()
    };
    let mut session = SimulationSession::new(
        anchored(dec!(175)),
        PriceResolver::new(Some(backend.clone()), GbmModel::new()),
        &settings,
        StdRng::seed_from_u64(3),
    );

    let outcome = session.advance_day().await.unwrap();
    let AdvanceOutcome::Advanced {
        day,
        price,
        source,
        news,
        ..
    } = outcome
    else {
        panic!("expected a step");
    };

    assert_eq!(day, 1);
    assert_eq!(price, dec!(178.50));
    assert_eq!(source, PriceSource::Remote);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

    let view = session.view();
    assert_eq!(view.daily_change_pct, dec!(2.00));
    assert_eq!(view.total_change_pct, dec!(2.00));
    assert_eq!(view.day_label, "Day 1/365");

    let event = news.expect("news forced on");
    assert_eq!(event.sentiment, Sentiment::Positive);
    assert_eq!(event.shock_pct, dec!(2.00));
    assert_eq!(event.day, Some(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()));
}

#[tokio::test]
async fn test_backend_failure_is_transparent() {
    let backend = Arc::new(ScriptedBackend {
        step: None,
        calls: AtomicUsize::new(0),
    });
    let mut session = SimulationSession::new(
        anchored(dec!(100)),
        PriceResolver::new(Some(backend.clone()), GbmModel::new()),
        &SessionSettings::default(),
        StdRng::seed_from_u64(4),
    );

    for day in 1..=3 {
        let outcome = session.advance_day().await.unwrap();
        let AdvanceOutcome::Advanced { source, day: d, .. } = outcome else {
            panic!("expected a step");
        };
        assert_eq!(source, PriceSource::Local);
        assert_eq!(d, day);
    }
    assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_fast_forward_stops_at_horizon() {
    let settings = SessionSettings::default();
    let mut session = demo_session("SPY", 5, &settings).await;

    let report = session
        .fast_forward_paced(HORIZON_DAYS - 5, Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(report.advanced, HORIZON_DAYS - 5);
    assert!(!report.exhausted);

    let report = session.fast_forward_paced(10, Duration::ZERO).await.unwrap();
    assert_eq!(report.requested, 10);
    assert_eq!(report.advanced, 5);
    assert!(report.exhausted);

    let report = session.fast_forward_paced(10, Duration::ZERO).await.unwrap();
    assert_eq!(report.advanced, 0);
    assert_eq!(session.state().current_day, HORIZON_DAYS);
}

#[tokio::test]
async fn test_independent_sessions_do_not_interfere() {
    let settings = SessionSettings::default();
    let mut a = demo_session("AAPL", 9, &settings).await;
    let mut b = demo_session("AAPL", 9, &settings).await;
    let mut c = demo_session("TSLA", 10, &settings).await;

    let (ra, rb, rc) = tokio::join!(
        a.fast_forward_paced(30, Duration::ZERO),
        b.fast_forward_paced(30, Duration::ZERO),
        c.fast_forward_paced(7, Duration::ZERO),
    );
    ra.unwrap();
    rb.unwrap();
    rc.unwrap();

    assert_eq!(a.projection(), b.projection());
    assert_eq!(a.state().current_day, 30);
    assert_eq!(c.state().current_day, 7);
    assert_eq!(c.profile().symbol, "TSLA");
}

#[tokio::test]
async fn test_chart_tracks_filled_prefix() {
    let settings = SessionSettings::default();
    let mut session = demo_session("AAPL", 12, &settings).await;
    session.fast_forward_paced(3, Duration::ZERO).await.unwrap();

    let chart = session.chart();
    let hist_len = session.history().series.len();
    assert_eq!(chart.labels.len(), hist_len + HORIZON_DAYS);
    assert_eq!(
        chart.projection.iter().filter(|p| p.is_some()).count(),
        3
    );
    assert_eq!(chart.projection[hist_len], session.projection().get(0));
}
