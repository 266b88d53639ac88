use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    pub symbol: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHolding {
    pub symbol: String,
    pub value: f64,
    pub percentage: f64,
}

/// Server-side portfolio summary from `/api/portfolio-analytics`.
///
/// `total_value` is optional on the wire: a payload without it is treated as
/// "no data" rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalytics {
    pub total_value: Option<f64>,
    #[serde(default)]
    pub total_stocks: f64,
    #[serde(default)]
    pub composition: Vec<CompositionEntry>,
    #[serde(default)]
    pub top_holdings: Vec<TopHolding>,
}

impl PortfolioAnalytics {
    /// Average position size, `None` when the portfolio has no stocks.
    pub fn average_position(&self) -> Option<f64> {
        match self.total_value {
            Some(total) if self.total_stocks > 0.0 => Some(total / self.total_stocks),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolOption {
    pub value: String,
}

/// Payload of `/api/portfolio-symbols`.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioSymbols {
    #[serde(default)]
    pub value: Vec<SymbolOption>,
}

impl PortfolioSymbols {
    /// Unique symbols in ascending order.
    pub fn unique_sorted(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.value.iter().map(|s| s.value.clone()).collect();
        symbols.sort();
        symbols.dedup();
        symbols
    }
}

/// One row of `/api/recent-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPrice {
    pub symbol: String,
    pub date: String,
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: f64,
}
