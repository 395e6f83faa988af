//! End-to-end integration tests

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use std::time::Duration;
use stock_projection::config::Config;
use stock_projection::model::GbmModel;
use stock_projection::series::HORIZON_DAYS;
use stock_projection::session::{load_stock, PriceResolver, SimulationSession};
use stock_projection::view::{TimeUnit, Timeframe};

fn example_config() -> Config {
    toml::from_str(include_str!("../../config.toml.example")).unwrap()
}

#[test]
fn test_config_example_parses() {
    let config = example_config();

    assert!(config.backend.enabled);
    assert_eq!(config.backend.base_url, "http://localhost:5000");
    assert_eq!(config.simulation.news_feed_capacity, 20);
    assert!(config.simulation.seed.is_none());

    let settings = config.session_settings();
    assert!((settings.gbm.dt - 1.0 / 252.0).abs() < 1e-12);
    assert_eq!(settings.fast_forward_delay, Duration::from_millis(50));
    assert_eq!(settings.notice_ttl, Duration::from_secs(5));
}

#[tokio::test]
async fn test_offline_year_projection() {
    let config = example_config();
    let settings = config.session_settings();
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let loaded = load_stock(None, "AAPL", today, &mut rng).await.unwrap();
    let anchor = loaded.history.last_real_price();
    let mut session = SimulationSession::new(
        loaded,
        PriceResolver::local_only(GbmModel::with_params(settings.gbm)),
        &settings,
        rng,
    );

    let report = session
        .fast_forward_paced(HORIZON_DAYS + 10, Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(report.advanced, HORIZON_DAYS);
    assert!(report.exhausted);

    let view = session.view();
    assert_eq!(view.day_label, "Day 365/365");
    assert!(view.current_price >= Decimal::new(1, 2));
    assert_eq!(session.state().last_real_price, anchor);
    assert!(session.news().len() <= settings.news_feed_capacity);

    let chart = session.chart();
    assert_eq!(chart.projection.iter().filter(|p| p.is_some()).count(), HORIZON_DAYS);
    assert_eq!(Timeframe::OneYear.time_unit(), TimeUnit::Month);
}

#[tokio::test]
async fn test_same_seed_same_projection() {
    let settings = example_config().session_settings();
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut rng = StdRng::seed_from_u64(7);
        let loaded = load_stock(None, "TSLA", today, &mut rng).await.unwrap();
        let mut session = SimulationSession::new(
            loaded,
            PriceResolver::local_only(GbmModel::with_params(settings.gbm)),
            &settings,
            rng,
        );
        session.fast_forward_paced(60, Duration::ZERO).await.unwrap();
        runs.push(session.projection().filled_prices());
    }

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[0].len(), 60);
}
