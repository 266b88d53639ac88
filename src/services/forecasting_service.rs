use rand::Rng;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{ModelMetrics, Prediction, PredictionPeriod};
use crate::services::indicators;

/// Minimum history needed before any prediction is attempted.
pub const MIN_FORECAST_POINTS: usize = 30;
/// Window used for the trend percentage.
pub const TREND_WINDOW: usize = 30;

/// Fixed parameters of one prediction horizon.
#[derive(Debug, Clone, Copy)]
struct Horizon {
    period: PredictionPeriod,
    trend_weight: f64,
    jitter_scale: f64,
    confidence_base: f64,
    confidence_slope: f64,
    confidence_floor: f64,
}

const HORIZONS: [Horizon; 3] = [
    Horizon {
        period: PredictionPeriod::NextDay,
        trend_weight: 0.1,
        jitter_scale: 200.0,
        confidence_base: 95.0,
        confidence_slope: 2.0,
        confidence_floor: 60.0,
    },
    Horizon {
        period: PredictionPeriod::OneWeek,
        trend_weight: 0.3,
        jitter_scale: 100.0,
        confidence_base: 85.0,
        confidence_slope: 3.0,
        confidence_floor: 50.0,
    },
    Horizon {
        period: PredictionPeriod::OneMonth,
        trend_weight: 0.8,
        jitter_scale: 50.0,
        confidence_base: 70.0,
        confidence_slope: 4.0,
        confidence_floor: 40.0,
    },
];

/// Percentage move from the first to the last of the trailing `TREND_WINDOW` prices.
pub fn trend_pct(prices: &[f64]) -> Option<f64> {
    let window = &prices[prices.len().saturating_sub(TREND_WINDOW)..];
    let first = *window.first()?;
    let last = *window.last()?;
    Some((last - first) / first * 100.0)
}

/// Heuristic forward estimates for the next day, week and month.
///
/// Each horizon nudges the current price by a weighted share of the 30-point
/// trend plus a uniform jitter in `[-0.5, 0.5) × volatility / scale`.
/// Confidence drops linearly with volatility down to a per-horizon floor.
/// This is not a statistical model; the RNG is injected so callers can seed it.
pub fn forecast<R: Rng>(prices: &[f64], rng: &mut R) -> Result<Vec<Prediction>, AppError> {
    if prices.len() < MIN_FORECAST_POINTS {
        return Err(AppError::InsufficientData {
            required: MIN_FORECAST_POINTS,
            actual: prices.len(),
        });
    }

    let current = prices[prices.len() - 1];
    let volatility = indicators::volatility(prices);
    let trend = trend_pct(prices).unwrap_or(0.0);

    debug!(
        "Forecasting from {} points (current {:.2}, trend {:.2}%, volatility {:.2})",
        prices.len(),
        current,
        trend,
        volatility
    );

    let predictions = HORIZONS
        .iter()
        .map(|h| {
            let jitter = rng.random::<f64>() - 0.5;
            let price = current
                * (1.0 + (trend / 100.0) * h.trend_weight + jitter * volatility / h.jitter_scale);
            let change_pct = (price - current) / current * 100.0;
            let confidence_pct =
                (h.confidence_base - volatility * h.confidence_slope).max(h.confidence_floor);

            Prediction {
                period: h.period,
                price,
                change_pct,
                confidence_pct,
            }
        })
        .collect();

    Ok(predictions)
}

/// Simulated accuracy / precision / recall figures, rounded to whole percents.
pub fn model_metrics<R: Rng>(rng: &mut R) -> ModelMetrics {
    let mut draw = |base: f64| (base + rng.random::<f64>() * 10.0).round() as u32;
    ModelMetrics {
        accuracy: draw(82.0),
        precision: draw(78.0),
        recall: draw(85.0),
    }
}
