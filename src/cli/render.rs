//! Terminal rendering for CLI output

use crate::demo::StockProfile;
use crate::news::NewsEvent;
use crate::notice::Notice;
use crate::series::{DataSource, HistoricalSeries};
use crate::session::{FastForwardReport, LoadedStock, SimulationSession};
use crate::view::DashboardView;
use chrono::{NaiveDate, Utc};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Serialize)]
struct SimulationOutput<'a> {
    profile: &'a StockProfile,
    source: DataSource,
    run: &'a FastForwardReport,
    view: DashboardView,
    projection: Vec<ProjectedDay>,
    news: Vec<&'a NewsEvent>,
    notices: Vec<&'a Notice>,
}

#[derive(Serialize)]
struct ProjectedDay {
    date: Option<NaiveDate>,
    price: Decimal,
}

#[derive(Serialize)]
struct HistoryOutput<'a> {
    profile: &'a StockProfile,
    history: &'a HistoricalSeries,
    projection_start: Option<NaiveDate>,
    notices: Vec<String>,
}

fn source_label(source: DataSource) -> &'static str {
    match source {
        DataSource::Backend { real: true } => "backend (market data)",
        DataSource::Backend { real: false } => "backend (simulated)",
        DataSource::Demo => "demo",
    }
}

pub(crate) fn print_simulation(
    session: &SimulationSession,
    report: &FastForwardReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let view = session.view();
    let projection = session.projection();
    let history = session.history();

    if format == OutputFormat::Json {
        let output = SimulationOutput {
            profile: session.profile(),
            source: history.source,
            run: report,
            view,
            projection: projection
                .filled_prices()
                .into_iter()
                .enumerate()
                .map(|(i, price)| ProjectedDay {
                    date: projection.date(i),
                    price,
                })
                .collect(),
            news: session.news().iter().collect(),
            notices: session.notices().active(Utc::now()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let profile = session.profile();
    println!("{} ({})", profile.name, profile.symbol);
    println!("  Source:        {}", source_label(history.source));
    println!("  Last real:     ${:.2}", session.state().last_real_price);
    println!("  {}", view.day_label);
    println!("  Current price: ${:.2}", view.current_price);
    println!("  Daily change:  {}", view.daily_change_label());
    println!("  Total change:  {}", view.total_change_label());
    println!("  Trend:         {:?}", view.trend);
    if report.exhausted {
        println!("  Projection complete");
    }

    if !session.news().is_empty() {
        println!();
        println!("News:");
        for event in session.news().iter() {
            let day = event
                .day
                .map(|d| d.to_string())
                .unwrap_or_else(|| "Today".to_string());
            println!(
                "  {}: {} - ${:.2} ({}{:.2}%)",
                day,
                event.headline,
                event.price,
                if event.shock_pct > Decimal::ZERO { "+" } else { "" },
                event.shock_pct
            );
        }
    }

    for notice in session.notices().active(Utc::now()) {
        eprintln!("[{:?}] {}", notice.level, notice.message);
    }
    Ok(())
}

pub(crate) fn print_history(loaded: &LoadedStock, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let output = HistoryOutput {
            profile: &loaded.profile,
            history: &loaded.history,
            projection_start: loaded.projection_dates.first().copied(),
            notices: loaded.notices.iter().map(|(_, m)| m.clone()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let series = &loaded.history.series;
    println!("{} ({})", loaded.profile.name, loaded.profile.symbol);
    println!("  Source:     {}", source_label(loaded.history.source));
    println!("  Points:     {}", series.len());
    if let (Some(first), Some(last)) = (series.dates().first(), series.dates().last()) {
        println!("  Range:      {} .. {}", first, last);
    }
    println!("  Last price: ${:.2}", series.last_price());
    if let Some(start) = loaded.projection_dates.first() {
        println!("  Projection: {} days from {}", loaded.projection_dates.len(), start);
    }

    for (level, message) in &loaded.notices {
        eprintln!("[{:?}] {}", level, message);
    }
    Ok(())
}
