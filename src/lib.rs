//! stock-projection: historical stock prices with a simulated one-year projection
//!
//! This library provides the core components for:
//! - GBM next-day price generation with Box-Muller shocks
//! - A projection session that advances day by day to a 365-day horizon
//! - Backend client for history and remote simulation, with local fallback
//! - Demo history synthesis when no backend data is available
//! - Derived dashboard and chart views
//! - Random news headlines and transient notices

pub mod backend;
pub mod cli;
pub mod config;
pub mod demo;
pub mod model;
pub mod news;
pub mod notice;
pub mod series;
pub mod session;
pub mod telemetry;
pub mod view;
