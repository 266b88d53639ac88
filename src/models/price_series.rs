use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Close-price history for one symbol, oldest first, as served by
/// `/api/chart/{symbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub prices: Vec<f64>,
    #[serde(default)]
    pub volumes: Vec<f64>,
}

impl PriceSeries {
    /// Labels and prices must pair up one-to-one.
    pub fn validate(self) -> Result<Self, AppError> {
        if self.labels.len() != self.prices.len() {
            return Err(AppError::Decode(format!(
                "chart data for {} has {} labels but {} prices",
                self.symbol,
                self.labels.len(),
                self.prices.len()
            )));
        }
        Ok(self)
    }

    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }
}
