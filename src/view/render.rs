//! Text renderers for each page region. Pure functions of their inputs.

use crate::models::{
    total_investment, CompositionEntry, Holding, IndicatorSnapshot, ModelMetrics, Prediction,
    RecentPrice, TopHolding,
};
use crate::view::format::{
    format_currency, format_decimal, format_number, format_rupees, format_signed_pct,
};

pub const EMPTY_HOLDINGS: &str = "No holdings found. Upload a portfolio to get started.";
pub const NO_DATA: &str = "No Data";
pub const LOADING_CHART: &str = "Loading chart data...";
pub const NO_RECENT_DATA: &str = "No recent data";
pub const PICKER_PLACEHOLDER: &str = "Choose a stock...";
/// Symbols the backend ships sample history for.
pub const TEST_SYMBOLS: [&str; 4] = ["RELIANCE.NS", "TCS.NS", "INFY.NS", "HDFCBANK.NS"];

/// Left-aligned text table with a header rule.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| {
                let pad = w.saturating_sub(c.chars().count());
                format!("{}{}", c, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.iter().map(|h| h.to_string()).collect())];
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.extend(rows.iter().map(|r| line(r.clone())));
    out.join("\n")
}

/// Holdings summary with total investment, or the empty-state message.
pub fn render_holdings(holdings: &[Holding]) -> String {
    if holdings.is_empty() {
        return EMPTY_HOLDINGS.to_string();
    }

    let rows: Vec<Vec<String>> = holdings
        .iter()
        .map(|h| {
            vec![
                h.symbol.clone(),
                format_number(h.qty),
                format_currency(h.avg),
                format_rupees(h.investment(), 2),
            ]
        })
        .collect();

    format!(
        "Portfolio Summary  {}\n\n{}",
        format_rupees(total_investment(holdings), 2),
        table(&["Symbol", "Quantity", "Avg Price", "Investment"], &rows)
    )
}

pub fn render_dashboard_stats(holdings: &[Holding], api_online: bool) -> String {
    format!(
        "Total Stocks     {}\nPortfolio Value  {}\nAPI Status       {}",
        holdings.len(),
        format_rupees(total_investment(holdings), 0),
        if api_online { "Online" } else { "Offline" }
    )
}

pub fn render_top_holdings(top: &[TopHolding]) -> String {
    let rows: Vec<Vec<String>> = top
        .iter()
        .map(|h| {
            vec![
                h.symbol.clone(),
                format_currency(h.value),
                format!("{:.2}%", h.percentage),
            ]
        })
        .collect();
    table(&["Symbol", "Value", "Share"], &rows)
}

pub fn render_composition_table(composition: &[CompositionEntry]) -> String {
    let rows: Vec<Vec<String>> = composition
        .iter()
        .map(|c| {
            vec![
                c.symbol.clone(),
                format_number(c.quantity),
                format_currency(c.avg_price),
                format_currency(c.value),
                format!("{:.2}%", c.percentage),
            ]
        })
        .collect();
    table(&["Symbol", "Quantity", "Avg Price", "Value", "Weight"], &rows)
}

/// The analysis picker: sample symbols, a separator, then portfolio symbols.
pub fn render_symbol_picker(portfolio_symbols: &[String], selected: Option<&str>) -> String {
    let mark = |s: &str| if Some(s) == selected { "> " } else { "  " };

    let mut lines = vec![format!("  {}", PICKER_PLACEHOLDER)];
    lines.extend(
        TEST_SYMBOLS
            .iter()
            .map(|s| format!("{}{} (Test Data)", mark(s), s)),
    );
    lines.push("  ─────────────────".to_string());
    lines.extend(portfolio_symbols.iter().map(|s| format!("{}{}", mark(s), s)));
    lines.join("\n")
}

pub fn render_chart_error(message: &str) -> String {
    format!("Error loading chart\n{}", message)
}

pub fn render_indicators_loading() -> String {
    indicator_lines(["...", "...", "...", "...", "...", "..."].map(String::from))
}

pub fn render_indicators(snapshot: &IndicatorSnapshot) -> String {
    indicator_lines([
        format!("{:.1}", snapshot.rsi),
        snapshot.volatility_level().label().to_string(),
        format_currency(snapshot.sma20),
        format_currency(snapshot.ema50),
        format!("₹{:.0} - ₹{:.0}", snapshot.range_low, snapshot.range_high),
        match snapshot.avg_volume {
            Some(v) => format!("{:.2}M", v / 1_000_000.0),
            None => "N/A".to_string(),
        },
    ])
}

fn indicator_lines(values: [String; 6]) -> String {
    let labels = [
        "RSI (14)",
        "Volatility",
        "SMA (20)",
        "EMA (50)",
        "Expected Range",
        "Avg Volume",
    ];
    labels
        .iter()
        .zip(values.iter())
        .map(|(l, v)| format!("{:<16}{}", l, v))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_predictions(predictions: &[Prediction]) -> String {
    predictions
        .iter()
        .map(|p| {
            format!(
                "{:<22}{:<16}{:<10}Confidence: {:.0}%",
                p.period.title(),
                format_currency(p.price),
                format_signed_pct(p.change_pct),
                p.confidence_pct
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_model_metrics(metrics: &ModelMetrics) -> String {
    [
        ("Accuracy", metrics.accuracy),
        ("Precision", metrics.precision),
        ("Recall", metrics.recall),
    ]
    .iter()
    .map(|(label, value)| {
        let filled = (*value as usize).min(100) / 5;
        format!(
            "{:<10}[{}{}] {}%",
            label,
            "#".repeat(filled),
            ".".repeat(20 - filled),
            value
        )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn render_recent_data(rows: &[RecentPrice]) -> String {
    if rows.is_empty() {
        return NO_RECENT_DATA.to_string();
    }

    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.symbol.clone(),
                format!("{} {}", r.date, r.time),
                format_decimal(r.open, 2),
                format_decimal(r.high, 2),
                format_decimal(r.low, 2),
                format_decimal(r.close, 2),
                format_number(r.volume),
                format_signed_pct(r.change_percent),
            ]
        })
        .collect();
    table(
        &["Symbol", "Time", "Open", "High", "Low", "Close", "Volume", "Change"],
        &rows,
    )
}
