//! Load command implementation

use super::render::{print_history, OutputFormat};
use super::{backend_from, rng_from};
use crate::config::Config;
use crate::session::load_stock;
use chrono::Local;
use clap::Args;

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Stock symbol
    #[arg(short, long, default_value = "AAPL")]
    pub symbol: String,

    /// Skip the backend entirely
    #[arg(long)]
    pub offline: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl LoadArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let backend = backend_from(config, self.offline)?;
        let mut rng = rng_from(config.simulation.seed);
        let today = Local::now().date_naive();

        let loaded = load_stock(backend.as_deref(), &self.symbol, today, &mut rng).await?;
        print_history(&loaded, self.format)
    }
}
