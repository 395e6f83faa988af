//! CLI interface for stock-projection
//!
//! Provides subcommands for:
//! - `simulate`: Load a stock and run the projection forward
//! - `load`: Load a stock and show its history
//! - `status`: Probe the backend
//! - `config`: Show configuration

mod load;
mod render;
mod simulate;

pub use load::LoadArgs;
pub use render::OutputFormat;
pub use simulate::SimulateArgs;

use crate::backend::{BackendClient, PriceBackend};
use crate::config::Config;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "stock-projection")]
#[command(about = "Historical stock prices with a simulated one-year GBM projection")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a stock and simulate projected days
    Simulate(SimulateArgs),
    /// Load a stock and show its history
    Load(LoadArgs),
    /// Probe the backend
    Status,
    /// Show configuration
    Config,
}

/// Backend client unless disabled by config or `--offline`
pub(crate) fn backend_from(
    config: &Config,
    offline: bool,
) -> anyhow::Result<Option<Arc<dyn PriceBackend>>> {
    if offline || !config.backend.enabled {
        tracing::info!("Running offline");
        return Ok(None);
    }
    let client = BackendClient::with_config(config.backend.client_config())?;
    Ok(Some(Arc::new(client)))
}

/// Seeded RNG when a seed is given, entropy otherwise
pub(crate) fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            tracing::debug!(seed, "Using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::parse_from([
            "stock-projection",
            "simulate",
            "--symbol",
            "TSLA",
            "--days",
            "365",
            "--seed",
            "42",
            "--offline",
        ]);
        let Commands::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.symbol, "TSLA");
        assert_eq!(args.days, 365);
        assert_eq!(args.seed, Some(42));
        assert!(args.offline);
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_offline_has_no_backend() {
        let config = Config::default();
        assert!(backend_from(&config, true).unwrap().is_none());
        assert!(backend_from(&config, false).unwrap().is_some());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;
        let a: u64 = rng_from(Some(5)).gen();
        let b: u64 = rng_from(Some(5)).gen();
        assert_eq!(a, b);
    }
}
