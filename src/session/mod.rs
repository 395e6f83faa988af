//! Simulation session module
//!
//! Owns one projection run: the loaded history, the day counter, the
//! projected prices and the news feed. `advance_day` takes `&mut self`, so
//! steps are serialized.

mod loader;
mod resolver;

pub use loader::{check_backend, load_stock, LoadedStock};
pub use resolver::{PriceResolver, PriceSource, Resolution};

use crate::demo::StockProfile;
use crate::model::{GbmParams, ModelError};
use crate::news::{NewsDesk, NewsEvent, NewsFeed, DEFAULT_FEED_CAPACITY, DEFAULT_NEWS_PROBABILITY};
use crate::notice::{NoticeBoard, NoticeLevel, DEFAULT_NOTICE_TTL_SECS};
use crate::series::{HistoricalSeries, ProjectionSeries, HORIZON_DAYS};
use crate::view::{ChartData, DashboardView};
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default pause between fast-forward steps
pub const DEFAULT_FAST_FORWARD_DELAY: Duration = Duration::from_millis(50);

/// Notice raised when advancing past the horizon
pub const PROJECTION_EXHAUSTED: &str = "Reached end of 1-year projection";

/// Tunables for a session
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub gbm: GbmParams,
    pub news_probability: f64,
    pub news_feed_capacity: usize,
    pub fast_forward_delay: Duration,
    pub notice_ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            gbm: GbmParams::default(),
            news_probability: DEFAULT_NEWS_PROBABILITY,
            news_feed_capacity: DEFAULT_FEED_CAPACITY,
            fast_forward_delay: DEFAULT_FAST_FORWARD_DELAY,
            notice_ttl: Duration::from_secs(DEFAULT_NOTICE_TTL_SECS),
        }
    }
}

/// Simulation phase, derived from the day counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Complete,
}

/// Anchor price and day counter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Last historical price, used while no day has been simulated
    pub last_real_price: Decimal,
    /// Simulated days so far, in [0, HORIZON_DAYS]
    pub current_day: usize,
}

impl SimulationState {
    pub fn new(last_real_price: Decimal) -> Self {
        Self {
            last_real_price,
            current_day: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.current_day {
            0 => Phase::Idle,
            d if d >= HORIZON_DAYS => Phase::Complete,
            _ => Phase::Running,
        }
    }

    pub fn remaining(&self) -> usize {
        HORIZON_DAYS.saturating_sub(self.current_day)
    }
}

/// Result of one `advance_day` call
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// A day was simulated
    Advanced {
        /// Day counter after the step
        day: usize,
        price: Decimal,
        shock: f64,
        source: PriceSource,
        news: Option<NewsEvent>,
    },
    /// Already at the horizon; nothing changed
    Exhausted,
}

/// Summary of a fast-forward run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastForwardReport {
    pub requested: usize,
    pub advanced: usize,
    /// The run ended at the horizon
    pub exhausted: bool,
}

/// One projection run over a loaded stock
pub struct SimulationSession {
    profile: StockProfile,
    history: Arc<HistoricalSeries>,
    projection: ProjectionSeries,
    state: SimulationState,
    resolver: PriceResolver,
    news_desk: NewsDesk,
    news: NewsFeed,
    notices: NoticeBoard,
    fast_forward_delay: Duration,
    rng: StdRng,
}

impl SimulationSession {
    pub fn new(
        loaded: LoadedStock,
        resolver: PriceResolver,
        settings: &SessionSettings,
        rng: StdRng,
    ) -> Self {
        let LoadedStock {
            profile,
            history,
            projection_dates,
            notices,
        } = loaded;

        let mut session = Self {
            profile,
            state: SimulationState::new(history.last_real_price()),
            history: Arc::new(history),
            projection: ProjectionSeries::new(projection_dates),
            resolver,
            news_desk: NewsDesk::new(settings.news_probability),
            news: NewsFeed::new(settings.news_feed_capacity),
            notices: NoticeBoard::new(settings.notice_ttl),
            fast_forward_delay: settings.fast_forward_delay,
            rng,
        };
        session.announce(notices);
        session
    }

    /// Replace the history and reset the projection
    pub fn reload(&mut self, loaded: LoadedStock) {
        let LoadedStock {
            profile,
            history,
            projection_dates,
            notices,
        } = loaded;

        self.state = SimulationState::new(history.last_real_price());
        self.projection = ProjectionSeries::new(projection_dates);
        self.history = Arc::new(history);
        self.profile = profile;
        self.news.clear();
        self.announce(notices);
    }

    fn announce(&mut self, notices: Vec<(NoticeLevel, String)>) {
        for (level, message) in notices {
            self.notices.raise(level, message);
        }

        tracing::info!(
            symbol = %self.profile.symbol,
            last_real_price = %self.state.last_real_price,
            "Session reset"
        );
    }

    /// Price the next step starts from
    pub fn current_price(&self) -> Decimal {
        match self.state.current_day {
            0 => self.state.last_real_price,
            d => self
                .projection
                .get(d - 1)
                .unwrap_or(self.state.last_real_price),
        }
    }

    /// Simulate one day
    pub async fn advance_day(&mut self) -> Result<AdvanceOutcome, ModelError> {
        if self.state.phase() == Phase::Complete {
            self.notices.raise(NoticeLevel::Error, PROJECTION_EXHAUSTED);
            return Ok(AdvanceOutcome::Exhausted);
        }

        let current = self.current_price();
        let Resolution { step, source } = self.resolver.resolve(current, &mut self.rng).await?;

        let Some(index) = self.projection.push(step.price) else {
            self.notices.raise(NoticeLevel::Error, PROJECTION_EXHAUSTED);
            return Ok(AdvanceOutcome::Exhausted);
        };
        self.state.current_day = index + 1;

        let news = self.news_desk.maybe_report(
            &mut self.rng,
            self.projection.date(index),
            step.price,
            step.shock,
        );
        if let Some(event) = &news {
            tracing::info!(
                day = self.state.current_day,
                headline = %event.headline,
                price = %event.price,
                "News event"
            );
            self.news.push(event.clone());
        }

        tracing::debug!(
            day = self.state.current_day,
            %current,
            price = %step.price,
            shock = step.shock,
            ?source,
            "Advanced one day"
        );

        Ok(AdvanceOutcome::Advanced {
            day: self.state.current_day,
            price: step.price,
            shock: step.shock,
            source,
            news,
        })
    }

    /// Advance up to `days` steps with the configured pacing
    pub async fn fast_forward(&mut self, days: usize) -> Result<FastForwardReport, ModelError> {
        self.fast_forward_paced(days, self.fast_forward_delay).await
    }

    /// Advance up to `days` steps, sleeping `pacing` between them
    pub async fn fast_forward_paced(
        &mut self,
        days: usize,
        pacing: Duration,
    ) -> Result<FastForwardReport, ModelError> {
        let budget = days.min(self.state.remaining());
        if budget == 0 && days > 0 {
            self.notices.raise(NoticeLevel::Error, PROJECTION_EXHAUSTED);
        }

        let mut advanced = 0;
        for step in 0..budget {
            if step > 0 && !pacing.is_zero() {
                tokio::time::sleep(pacing).await;
            }
            match self.advance_day().await? {
                AdvanceOutcome::Advanced { .. } => advanced += 1,
                AdvanceOutcome::Exhausted => break,
            }
        }

        let report = FastForwardReport {
            requested: days,
            advanced,
            exhausted: self.state.phase() == Phase::Complete,
        };
        tracing::info!(
            requested = report.requested,
            advanced = report.advanced,
            day = self.state.current_day,
            "Fast-forward finished"
        );
        Ok(report)
    }

    /// Display aggregates for the current state
    pub fn view(&self) -> DashboardView {
        DashboardView::project(&self.history, &self.projection, &self.state)
    }

    /// Aligned chart series for the current state
    pub fn chart(&self) -> ChartData {
        ChartData::build(&self.history, &self.projection, &self.state)
    }

    pub fn profile(&self) -> &StockProfile {
        &self.profile
    }

    pub fn history(&self) -> Arc<HistoricalSeries> {
        Arc::clone(&self.history)
    }

    pub fn projection(&self) -> &ProjectionSeries {
        &self.projection
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn news(&self) -> &NewsFeed {
        &self.news
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }
}
