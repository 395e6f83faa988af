use clap::Parser;
use stock_projection::backend::{BackendClient, PriceBackend};
use stock_projection::cli::{Cli, Commands};
use stock_projection::config::Config;
use stock_projection::session::check_backend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    stock_projection::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Simulate(args) => {
            tracing::info!("Starting projection");
            args.execute(&config).await?;
        }
        Commands::Load(args) => {
            tracing::info!("Loading stock");
            args.execute(&config).await?;
        }
        Commands::Status => {
            let client = BackendClient::with_config(config.backend.client_config())?;
            let connected = check_backend(&client as &dyn PriceBackend).await;
            println!("stock-projection status");
            println!("  Backend: {}", client.base_url());
            println!(
                "  Status: {}",
                if connected { "Connected" } else { "Unreachable (demo data)" }
            );
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Backend: {} (enabled={})",
                config.backend.base_url, config.backend.enabled
            );
            println!(
                "  Timeouts: probe={}ms request={}ms",
                config.backend.probe_timeout_ms, config.backend.request_timeout_ms
            );
            println!(
                "  GBM: mu={}, sigma={}, days/year={}",
                config.simulation.drift,
                config.simulation.volatility,
                config.simulation.trading_days_per_year
            );
            println!(
                "  News: p={}, feed={}",
                config.simulation.news_probability, config.simulation.news_feed_capacity
            );
            println!(
                "  Fast-forward delay: {}ms",
                config.simulation.fast_forward_delay_ms
            );
            println!("  Notice TTL: {}s", config.notices.ttl_secs);
        }
    }

    Ok(())
}
