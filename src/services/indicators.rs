use crate::models::{IndicatorSnapshot, PriceSeries};

pub const RSI_PERIOD: usize = 14;
pub const SMA_PERIOD: usize = 20;
pub const EMA_PERIOD: usize = 50;

/// Relative Strength Index over the last `period` transitions.
///
/// RSI values range from 0 to 100:
/// - Below 30: Oversold condition
/// - Above 70: Overbought condition
/// - 50: Neutral momentum
///
/// Gains and losses are plain averages over the window (no Wilder smoothing).
/// Returns 50 when fewer than `period + 1` prices exist, and 100 when the
/// window holds no losses.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return 50.0;
    }

    let window = &prices[prices.len() - period - 1..];

    let (gains, losses) = window
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0_f64, 0.0_f64), |(g, l), change| {
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l - change)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Simple Moving Average of the last `period` prices.
///
/// With fewer than `period` prices the last price is returned unchanged.
/// `None` only for an empty series.
pub fn sma(prices: &[f64], period: usize) -> Option<f64> {
    let last = *prices.last()?;
    if period == 0 || prices.len() < period {
        return Some(last);
    }

    let sum: f64 = prices[prices.len() - period..].iter().sum();
    Some(sum / period as f64)
}

/// Exponential Moving Average.
///
/// Seeds with the SMA of the first `period` prices, then folds the remaining
/// prices forward with alpha = 2 / (period + 1). Falls back to the last price
/// when there are fewer than `period` prices.
pub fn ema(prices: &[f64], period: usize) -> Option<f64> {
    let last = *prices.last()?;
    if period == 0 || prices.len() < period {
        return Some(last);
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let seed = sma(&prices[..period], period)?;

    Some(
        prices[period..]
            .iter()
            .fold(seed, |prev, &price| (price - prev) * alpha + prev),
    )
}

/// Population standard deviation of period-over-period percentage returns,
/// in percentage points. 0 for fewer than two prices.
pub fn volatility(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = prices
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0] * 100.0)
        .collect();

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns
        .iter()
        .map(|r| {
            let diff = r - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    variance.sqrt()
}

/// Average of the volume column, `None` when the backend sent no volumes.
pub fn average_volume(volumes: &[f64]) -> Option<f64> {
    if volumes.is_empty() {
        return None;
    }
    Some(volumes.iter().sum::<f64>() / volumes.len() as f64)
}

/// Everything the analysis panel shows for a series. `None` for an empty series.
pub fn indicator_snapshot(series: &PriceSeries) -> Option<IndicatorSnapshot> {
    let prices = &series.prices;
    let last = series.last_price()?;

    let volatility = volatility(prices);
    let band = volatility * last / 100.0;

    Some(IndicatorSnapshot {
        rsi: rsi(prices, RSI_PERIOD),
        volatility,
        sma20: sma(prices, SMA_PERIOD)?,
        ema50: ema(prices, EMA_PERIOD)?,
        range_low: last - band,
        range_high: last + band,
        avg_volume: average_volume(&series.volumes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VolatilityLevel;

    fn ramp() -> Vec<f64> {
        // 10, 11, ..., 30
        (10..=30).map(|v| v as f64).collect()
    }

    #[test]
    fn test_rsi_neutral_for_short_series() {
        let prices: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&prices, 14), 50.0);
        assert_eq!(rsi(&[], 14), 50.0);
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&prices, 14), 100.0);
    }

    #[test]
    fn test_rsi_all_losses_is_0() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        assert_eq!(rsi(&prices, 14), 0.0);
    }

    #[test]
    fn test_rsi_only_uses_last_period_transitions() {
        // A crash before the window must not matter
        let mut prices = vec![500.0, 100.0];
        prices.extend((1..=14).map(|i| 100.0 + i as f64));
        assert_eq!(rsi(&prices, 14), 100.0);
    }

    #[test]
    fn test_rsi_known_value() {
        // 7 gains of 2 and 7 losses of 1 -> RS = 2 -> RSI = 66.67
        let mut prices = vec![100.0];
        for i in 0..14 {
            let last = *prices.last().unwrap();
            prices.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        assert!((rsi(&prices, 14) - 66.666_666).abs() < 1e-4);
    }

    #[test]
    fn test_rsi_bounded() {
        let volatile: Vec<f64> = (0..60).map(|i| 100.0 + ((i as f64) * 1.7).sin() * 10.0).collect();
        for end in 1..=volatile.len() {
            let value = rsi(&volatile[..end], 14);
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_sma_and_ema_fall_back_to_last_price() {
        let prices = vec![4.0, 7.0, 9.5];
        assert_eq!(sma(&prices, 20), Some(9.5));
        assert_eq!(ema(&prices, 50), Some(9.5));
        assert_eq!(sma(&[], 20), None);
        assert_eq!(ema(&[], 20), None);
    }

    #[test]
    fn test_sma_last_window() {
        assert_eq!(sma(&ramp(), 20), Some(20.5));
    }

    #[test]
    fn test_ema_between_seed_and_last_price() {
        let prices = ramp();
        let seed = sma(&prices[..20], 20).unwrap();
        let value = ema(&prices, 20).unwrap();
        assert_eq!(seed, 19.5);
        assert!(value > seed && value < 30.0);
        assert!((value - 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_ema_equals_sma_when_length_equals_period() {
        let prices: Vec<f64> = (1..=10).map(|v| v as f64 * 3.0).collect();
        assert_eq!(ema(&prices, 10), sma(&prices, 10));
    }

    #[test]
    fn test_volatility_constant_series_is_zero() {
        assert_eq!(volatility(&[100.0; 30]), 0.0);
        assert_eq!(volatility(&[100.0]), 0.0);
        assert_eq!(volatility(&[]), 0.0);
    }

    #[test]
    fn test_volatility_is_population_std_dev() {
        // returns: +10%, -10% -> mean 0, population std dev 10
        let prices = vec![100.0, 110.0, 99.0];
        assert!((volatility(&prices) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot() {
        let series = PriceSeries {
            symbol: "TCS.NS".into(),
            labels: (0..21).map(|i| format!("2024-01-{:02}", i + 1)).collect(),
            prices: ramp(),
            volumes: vec![1_000_000.0, 3_000_000.0],
        };
        let snapshot = indicator_snapshot(&series).unwrap();
        assert_eq!(snapshot.rsi, 100.0);
        assert_eq!(snapshot.sma20, 20.5);
        // Fewer than 50 points: EMA falls back to the last price
        assert_eq!(snapshot.ema50, 30.0);
        assert!(snapshot.range_low < 30.0 && snapshot.range_high > 30.0);
        assert_eq!(snapshot.avg_volume, Some(2_000_000.0));
        // returns fall from 10% to ~3.4%, std dev ~1.89
        assert_eq!(snapshot.volatility_level(), VolatilityLevel::Medium);
    }

    #[test]
    fn test_snapshot_empty_series() {
        let series = PriceSeries {
            symbol: "X".into(),
            labels: vec![],
            prices: vec![],
            volumes: vec![],
        };
        assert!(indicator_snapshot(&series).is_none());
    }
}
