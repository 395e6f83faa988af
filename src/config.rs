//! Configuration types for stock-projection

use crate::backend::{BackendConfig, DEFAULT_BASE_URL};
use crate::model::{GbmParams, DEFAULT_DRIFT, DEFAULT_VOLATILITY, TRADING_DAYS_PER_YEAR};
use crate::news::{DEFAULT_FEED_CAPACITY, DEFAULT_NEWS_PROBABILITY};
use crate::notice::DEFAULT_NOTICE_TTL_SECS;
use crate::session::SessionSettings;
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub notices: NoticeConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Remote backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSection {
    /// Disable to run fully offline
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Liveness probe timeout (milliseconds)
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Data request timeout (milliseconds)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_probe_timeout_ms() -> u64 {
    2_000
}
fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            probe_timeout_ms: default_probe_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl BackendSection {
    pub fn client_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.base_url.clone(),
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

/// Projection simulation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Annualized drift (mu)
    #[serde(default = "default_drift")]
    pub drift: f64,

    /// Annualized volatility (sigma)
    #[serde(default = "default_volatility")]
    pub volatility: f64,

    #[serde(default = "default_trading_days")]
    pub trading_days_per_year: f64,

    /// Chance of a news headline per simulated day
    #[serde(default = "default_news_probability")]
    pub news_probability: f64,

    /// Pause between fast-forward steps (milliseconds)
    #[serde(default = "default_fast_forward_delay_ms")]
    pub fast_forward_delay_ms: u64,

    #[serde(default = "default_news_feed_capacity")]
    pub news_feed_capacity: usize,

    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_drift() -> f64 {
    DEFAULT_DRIFT
}
fn default_volatility() -> f64 {
    DEFAULT_VOLATILITY
}
fn default_trading_days() -> f64 {
    TRADING_DAYS_PER_YEAR
}
fn default_news_probability() -> f64 {
    DEFAULT_NEWS_PROBABILITY
}
fn default_fast_forward_delay_ms() -> u64 {
    50
}
fn default_news_feed_capacity() -> usize {
    DEFAULT_FEED_CAPACITY
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            drift: DEFAULT_DRIFT,
            volatility: DEFAULT_VOLATILITY,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            news_probability: DEFAULT_NEWS_PROBABILITY,
            fast_forward_delay_ms: default_fast_forward_delay_ms(),
            news_feed_capacity: DEFAULT_FEED_CAPACITY,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn gbm_params(&self) -> GbmParams {
        GbmParams::daily(self.drift, self.volatility, self.trading_days_per_year)
    }
}

/// Notice display configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NoticeConfig {
    /// Seconds a notice stays visible
    #[serde(default = "default_notice_ttl")]
    pub ttl_secs: u64,
}

fn default_notice_ttl() -> u64 {
    DEFAULT_NOTICE_TTL_SECS
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_NOTICE_TTL_SECS,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Session tunables derived from this configuration
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            gbm: self.simulation.gbm_params(),
            news_probability: self.simulation.news_probability,
            news_feed_capacity: self.simulation.news_feed_capacity,
            fast_forward_delay: Duration::from_millis(self.simulation.fast_forward_delay_ms),
            notice_ttl: Duration::from_secs(self.notices.ttl_secs),
        }
    }
}
