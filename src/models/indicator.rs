use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
}

impl VolatilityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            VolatilityLevel::Low => "Low",
            VolatilityLevel::Medium => "Medium",
            VolatilityLevel::High => "High",
        }
    }
}

/// Indicators computed client-side for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub volatility: f64,
    pub sma20: f64,
    pub ema50: f64,
    pub range_low: f64,
    pub range_high: f64,
    pub avg_volume: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn volatility_level(&self) -> VolatilityLevel {
        if self.volatility > 2.0 {
            VolatilityLevel::High
        } else if self.volatility > 1.0 {
            VolatilityLevel::Medium
        } else {
            VolatilityLevel::Low
        }
    }
}
