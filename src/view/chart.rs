use tracing::debug;

use crate::models::{CompositionEntry, PriceSeries};
use crate::view::format::{format_currency, format_decimal, RUPEE};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const CHART_WIDTH: usize = 60;
/// Slices shown individually before the rest is folded into "Others".
pub const COMPOSITION_SLICES: usize = 10;

/// A rendered close-price line chart.
#[derive(Debug, Clone)]
pub struct PriceChart {
    pub id: u64,
    pub symbol: String,
    labels: Vec<String>,
    prices: Vec<f64>,
}

impl PriceChart {
    /// Sparkline of at most `width` columns, each column the last close of
    /// its bucket, plus the y range and first/last dates.
    pub fn render(&self, width: usize) -> String {
        if self.prices.is_empty() {
            return format!("{} Close Price\n(no data)", self.symbol);
        }

        let width = width.max(1);
        let bucket = self.prices.len().div_ceil(width);
        let samples: Vec<f64> = self
            .prices
            .chunks(bucket)
            .filter_map(|c| c.last().copied())
            .collect();

        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        let span = max - min;

        let line: String = samples
            .iter()
            .map(|&p| {
                let level = if span == 0.0 {
                    SPARK_LEVELS.len() / 2
                } else {
                    (((p - min) / span) * (SPARK_LEVELS.len() - 1) as f64).round() as usize
                };
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
            })
            .collect();

        let first = self.labels.first().map(String::as_str).unwrap_or("");
        let last = self.labels.last().map(String::as_str).unwrap_or("");

        format!(
            "{} Close Price  high {}{:.0}  low {}{:.0}\n{}\n{} .. {}  last {}",
            self.symbol,
            RUPEE,
            max,
            RUPEE,
            min,
            line,
            first,
            last,
            format_currency(self.prices[self.prices.len() - 1]),
        )
    }

    fn destroy(self) {
        debug!("Destroying chart #{} for {}", self.id, self.symbol);
    }
}

/// Holds at most one price chart. The previous chart is destroyed before its
/// replacement is built, so two never coexist.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<PriceChart>,
    created: u64,
    destroyed: u64,
}

impl ChartSlot {
    pub fn replace(&mut self, series: &PriceSeries) -> &PriceChart {
        if let Some(old) = self.current.take() {
            old.destroy();
            self.destroyed += 1;
        }

        self.created += 1;
        self.current.insert(PriceChart {
            id: self.created,
            symbol: series.symbol.clone(),
            labels: series.labels.clone(),
            prices: series.prices.clone(),
        })
    }

    pub fn current(&self) -> Option<&PriceChart> {
        self.current.as_ref()
    }

    /// Charts built minus charts destroyed; never above one.
    pub fn live_charts(&self) -> u64 {
        self.created - self.destroyed
    }

    pub fn render(&self) -> Option<String> {
        self.current.as_ref().map(|c| c.render(CHART_WIDTH))
    }
}

/// The ten largest positions (in given order) and an "Others" slice for the
/// remainder when it is positive.
pub fn composition_slices(composition: &[CompositionEntry]) -> Vec<(String, f64)> {
    let mut slices: Vec<(String, f64)> = composition
        .iter()
        .take(COMPOSITION_SLICES)
        .map(|c| (c.symbol.clone(), c.value))
        .collect();

    let others: f64 = composition.iter().skip(COMPOSITION_SLICES).map(|c| c.value).sum();
    if others > 0.0 {
        slices.push(("Others".to_string(), others));
    }

    slices
}

/// Horizontal bar rendering of the composition slices, standing in for the
/// doughnut chart.
pub fn render_composition(composition: &[CompositionEntry]) -> String {
    let slices = composition_slices(composition);
    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    let label_width = slices.iter().map(|(s, _)| s.chars().count()).max().unwrap_or(0);

    slices
        .iter()
        .map(|(symbol, value)| {
            let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            let bar = "█".repeat((pct / 2.5).round() as usize);
            format!(
                "{:<width$}  {:<40} {} ({}%)",
                symbol,
                bar,
                format_currency(*value),
                format_decimal(pct, 1),
                width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
