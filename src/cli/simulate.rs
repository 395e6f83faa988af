//! Simulate command implementation

use super::render::{print_simulation, OutputFormat};
use super::{backend_from, rng_from};
use crate::config::Config;
use crate::model::GbmModel;
use crate::session::{load_stock, PriceResolver, SimulationSession};
use chrono::Local;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Stock symbol
    #[arg(short, long, default_value = "AAPL")]
    pub symbol: String,

    /// Days to simulate (capped at the one-year horizon)
    #[arg(short, long, default_value = "10")]
    pub days: usize,

    /// RNG seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the backend entirely
    #[arg(long)]
    pub offline: bool,

    /// Pause between steps in ms (overrides config)
    #[arg(long)]
    pub pace_ms: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl SimulateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let settings = config.session_settings();
        let backend = backend_from(config, self.offline)?;
        let mut rng = rng_from(self.seed.or(config.simulation.seed));
        let today = Local::now().date_naive();

        let loaded = load_stock(backend.as_deref(), &self.symbol, today, &mut rng).await?;
        let resolver = PriceResolver::new(backend, GbmModel::with_params(settings.gbm));
        let mut session = SimulationSession::new(loaded, resolver, &settings, rng);

        let pacing = self
            .pace_ms
            .map(Duration::from_millis)
            .unwrap_or(settings.fast_forward_delay);
        tracing::info!(
            symbol = %session.profile().symbol,
            days = self.days,
            pacing_ms = pacing.as_millis() as u64,
            "Simulating projection"
        );

        let report = session.fast_forward_paced(self.days, pacing).await?;
        print_simulation(&session, &report, self.format)
    }
}
