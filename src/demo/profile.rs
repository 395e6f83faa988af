//! Known stock profiles

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default series color for unknown symbols
const DEFAULT_COLOR: &str = "#3b82f6";

/// Display metadata and demo base price for a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockProfile {
    pub symbol: String,
    pub name: String,
    pub color: String,
    pub base_price: Decimal,
}

impl StockProfile {
    /// Look up a symbol, falling back to a generic profile with base price 100
    pub fn lookup(symbol: &str) -> Self {
        let symbol = symbol.trim().to_uppercase();
        let (name, color, base_price) = match symbol.as_str() {
            "AAPL" => ("Apple", "#A2AAAD", dec!(175)),
            "TSLA" => ("Tesla", "#E82127", dec!(250)),
            "SPY" => ("S&P 500", "#00BFFF", dec!(450)),
            _ => {
                return Self {
                    name: symbol.clone(),
                    symbol,
                    color: DEFAULT_COLOR.to_string(),
                    base_price: dec!(100),
                }
            }
        };

        Self {
            symbol,
            name: name.to_string(),
            color: color.to_string(),
            base_price,
        }
    }
}
