//! News module
//!
//! Random display-only headlines attached to simulated days

mod feed;

pub use feed::{NewsFeed, DEFAULT_FEED_CAPACITY};

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default chance of a headline per simulated day
pub const DEFAULT_NEWS_PROBABILITY: f64 = 0.15;

const POSITIVE_HEADLINES: [&str; 4] = [
    "Positive earnings report",
    "New product launch",
    "Analyst upgrade",
    "Market rally",
];

const NEGATIVE_HEADLINES: [&str; 4] = [
    "Earnings miss",
    "Regulatory concerns",
    "CEO resignation",
    "Market correction",
];

/// Direction of the shock behind a headline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Positive iff the shock is strictly positive
    pub fn from_shock(shock: f64) -> Self {
        if shock > 0.0 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    pub fn headlines(self) -> &'static [&'static str] {
        match self {
            Sentiment::Positive => &POSITIVE_HEADLINES,
            Sentiment::Negative => &NEGATIVE_HEADLINES,
        }
    }
}

/// A headline attached to a simulated day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub id: Uuid,
    /// Projection date of the price, if the axis covers it
    pub day: Option<NaiveDate>,
    pub headline: String,
    pub price: Decimal,
    /// Shock as a percentage, 2 dp
    pub shock_pct: Decimal,
    pub sentiment: Sentiment,
}

/// Decides whether a day makes the news and writes the headline
#[derive(Debug, Clone, Copy)]
pub struct NewsDesk {
    probability: f64,
}

impl NewsDesk {
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability }
    }

    /// Bernoulli draw, then a uniformly chosen headline for the shock's sign
    pub fn maybe_report<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        day: Option<NaiveDate>,
        price: Decimal,
        shock: f64,
    ) -> Option<NewsEvent> {
        if !rng.gen_bool(self.probability) {
            return None;
        }
        Some(Self::report(rng, day, price, shock))
    }

    /// Write a headline unconditionally
    pub fn report<R: Rng + ?Sized>(
        rng: &mut R,
        day: Option<NaiveDate>,
        price: Decimal,
        shock: f64,
    ) -> NewsEvent {
        let sentiment = Sentiment::from_shock(shock);
        let headlines = sentiment.headlines();
        let headline = headlines[rng.gen_range(0..headlines.len())];

        NewsEvent {
            id: Uuid::new_v4(),
            day,
            headline: headline.to_string(),
            price,
            shock_pct: Decimal::from_f64(shock * 100.0)
                .unwrap_or_default()
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            sentiment,
        }
    }
}

impl Default for NewsDesk {
    fn default() -> Self {
        Self::new(DEFAULT_NEWS_PROBABILITY)
    }
}
