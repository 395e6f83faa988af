//! Integration tests for stock loading and demo fallback

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;
use stock_projection::backend::{
    BackendClient, BackendConfig, BackendError, HistoryPayload, PriceBackend,
};
use stock_projection::model::{GbmParams, PriceStep};
use stock_projection::notice::NoticeLevel;
use stock_projection::series::{is_weekend, DataSource, PriceSeries, HORIZON_DAYS};
use stock_projection::session::{check_backend, load_stock};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

enum Mode {
    Down,
    HistoryFails,
    Serves { real: bool },
}

struct FakeBackend(Mode);

#[async_trait]
impl PriceBackend for FakeBackend {
    async fn ping(&self) -> Result<(), BackendError> {
        match self.0 {
            Mode::Down => Err(BackendError::Timeout),
            _ => Ok(()),
        }
    }

    async fn fetch_history(&self, _symbol: &str) -> Result<HistoryPayload, BackendError> {
        match self.0 {
            Mode::Down => Err(BackendError::Timeout),
            Mode::HistoryFails => Err(BackendError::Malformed("missing history.prices".into())),
            Mode::Serves { real } => {
                let d1 = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
                Ok(HistoryPayload {
                    series: PriceSeries::new(vec![d1, today()], vec![dec!(248.1), dec!(251.3)])
                        .unwrap(),
                    real,
                    name: Some("Tesla, Inc.".to_string()),
                    color: None,
                })
            }
        }
    }

    async fn simulate_next_day(
        &self,
        _current: Decimal,
        _params: &GbmParams,
    ) -> Result<PriceStep, BackendError> {
        Err(BackendError::Timeout)
    }
}

#[tokio::test]
async fn test_history_failure_falls_back_to_demo_tsla() {
    let backend = FakeBackend(Mode::HistoryFails);
    let mut rng = StdRng::seed_from_u64(1);

    let loaded = load_stock(Some(&backend), "TSLA", today(), &mut rng)
        .await
        .unwrap();

    assert!(loaded.is_demo());
    assert_eq!(loaded.profile.base_price, dec!(250));
    // Offset 0 falls on a weekday, so the first price sits in [250, 255]
    let first = loaded.history.series.prices()[0];
    assert!(first >= dec!(250) && first <= dec!(255), "first = {}", first);
    assert_eq!(loaded.notices.len(), 1);
    assert_eq!(loaded.notices[0].0, NoticeLevel::Error);
    assert!(loaded.notices[0].1.starts_with("Failed to load"));
}

#[tokio::test]
async fn test_unreachable_backend_uses_demo() {
    let backend = FakeBackend(Mode::Down);
    let mut rng = StdRng::seed_from_u64(2);

    assert!(!check_backend(&backend).await);
    let loaded = load_stock(Some(&backend), "AAPL", today(), &mut rng)
        .await
        .unwrap();

    assert_eq!(loaded.history.source, DataSource::Demo);
    assert_eq!(loaded.notices[0].0, NoticeLevel::Warning);
    assert!(loaded.history.series.dates().iter().all(|d| !is_weekend(*d)));
    assert!(loaded.projection_dates.iter().all(|d| !is_weekend(*d)));
}

#[tokio::test]
async fn test_real_backend_history() {
    let backend = FakeBackend(Mode::Serves { real: true });
    let mut rng = StdRng::seed_from_u64(3);

    let loaded = load_stock(Some(&backend), "tsla", today(), &mut rng)
        .await
        .unwrap();

    assert_eq!(loaded.history.source, DataSource::Backend { real: true });
    assert_eq!(loaded.history.last_real_price(), dec!(251.3));
    assert_eq!(loaded.profile.symbol, "TSLA");
    assert_eq!(loaded.profile.name, "Tesla, Inc.");
    assert_eq!(loaded.profile.color, "#E82127");
    assert_eq!(loaded.projection_dates.len(), HORIZON_DAYS);
    assert!(loaded.notices.is_empty());
}

#[tokio::test]
async fn test_backend_fallback_data_warns() {
    let backend = FakeBackend(Mode::Serves { real: false });
    let mut rng = StdRng::seed_from_u64(4);

    let loaded = load_stock(Some(&backend), "TSLA", today(), &mut rng)
        .await
        .unwrap();

    assert_eq!(loaded.history.source, DataSource::Backend { real: false });
    assert_eq!(loaded.notices.len(), 1);
    assert_eq!(loaded.notices[0].0, NoticeLevel::Warning);
}

#[tokio::test]
async fn test_offline_uses_demo() {
    let mut rng = StdRng::seed_from_u64(5);
    let loaded = load_stock(None, "UNKNOWN", today(), &mut rng).await.unwrap();

    assert!(loaded.is_demo());
    assert_eq!(loaded.profile.base_price, dec!(100));
    assert_eq!(loaded.notices[0].0, NoticeLevel::Info);
}

#[tokio::test]
async fn test_http_client_unreachable_falls_back() {
    let client = BackendClient::with_config(BackendConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        probe_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_millis(500),
    })
    .unwrap();
    let mut rng = StdRng::seed_from_u64(6);

    let loaded = load_stock(Some(&client), "SPY", today(), &mut rng)
        .await
        .unwrap();

    assert!(loaded.is_demo());
    assert_eq!(loaded.profile.base_price, dec!(450));
}
