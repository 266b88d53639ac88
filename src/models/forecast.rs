use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionPeriod {
    NextDay,
    OneWeek,
    OneMonth,
}

impl PredictionPeriod {
    pub const ALL: [PredictionPeriod; 3] = [
        PredictionPeriod::NextDay,
        PredictionPeriod::OneWeek,
        PredictionPeriod::OneMonth,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PredictionPeriod::NextDay => "Next Day Prediction",
            PredictionPeriod::OneWeek => "1 Week Forecast",
            PredictionPeriod::OneMonth => "1 Month Outlook",
        }
    }
}

/// Heuristic price estimate for one horizon. Not a model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub period: PredictionPeriod,
    pub price: f64,
    pub change_pct: f64,
    pub confidence_pct: f64,
}

/// Simulated "model quality" figures shown next to the predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: u32,
    pub precision: u32,
    pub recall: u32,
}
