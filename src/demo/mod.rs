//! Demo data module
//!
//! Synthesizes history and projection dates when the backend has none

mod profile;
mod synthesizer;

pub use profile::StockProfile;
pub use synthesizer::{synthesize, DemoData, HISTORY_SPAN_DAYS};
