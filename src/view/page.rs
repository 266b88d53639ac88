use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::view::chart::ChartSlot;

pub type SharedPage = Arc<Mutex<Page>>;

/// Which dashboard screen is open. Decides which regions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Dashboard,
    Portfolio,
    Analytics,
    Data,
}

impl PageKind {
    pub fn regions(&self) -> &'static [Region] {
        match self {
            PageKind::Dashboard => &[Region::DashboardStats, Region::RecentData],
            PageKind::Portfolio => &[Region::HoldingsContainer],
            PageKind::Analytics => &[
                Region::PortfolioValue,
                Region::PortfolioStocks,
                Region::AvgPosition,
                Region::CompositionChart,
                Region::HoldingsTable,
                Region::TopHoldings,
                Region::SymbolPicker,
                Region::PriceChart,
                Region::Indicators,
                Region::Predictions,
                Region::ModelMetrics,
            ],
            PageKind::Data => &[Region::HoldingsContainer, Region::RecentData],
        }
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dashboard" | "" => Ok(PageKind::Dashboard),
            "portfolio" => Ok(PageKind::Portfolio),
            "analytics" => Ok(PageKind::Analytics),
            "data" => Ok(PageKind::Data),
            other => Err(format!(
                "unknown page '{}', expected dashboard, portfolio, analytics or data",
                other
            )),
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::Dashboard => "dashboard",
            PageKind::Portfolio => "portfolio",
            PageKind::Analytics => "analytics",
            PageKind::Data => "data",
        };
        f.write_str(name)
    }
}

/// Named containers a page may mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    DashboardStats,
    HoldingsContainer,
    PortfolioValue,
    PortfolioStocks,
    AvgPosition,
    CompositionChart,
    HoldingsTable,
    TopHoldings,
    SymbolPicker,
    PriceChart,
    Indicators,
    Predictions,
    ModelMetrics,
    RecentData,
}

impl Region {
    pub fn title(&self) -> &'static str {
        match self {
            Region::DashboardStats => "Dashboard",
            Region::HoldingsContainer => "Holdings",
            Region::PortfolioValue => "Portfolio Value",
            Region::PortfolioStocks => "Total Stocks",
            Region::AvgPosition => "Avg Position",
            Region::CompositionChart => "Portfolio Composition",
            Region::HoldingsTable => "Holdings Breakdown",
            Region::TopHoldings => "Top Holdings",
            Region::SymbolPicker => "Analysis Symbols",
            Region::PriceChart => "Price Chart",
            Region::Indicators => "Technical Indicators",
            Region::Predictions => "AI Predictions",
            Region::ModelMetrics => "Model Performance",
            Region::RecentData => "Recent Data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Danger,
}

impl AlertKind {
    fn tag(&self) -> &'static str {
        match self {
            AlertKind::Info => "INFO",
            AlertKind::Success => "OK",
            AlertKind::Danger => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

/// In-memory stand-in for the document: mounted regions, the single alert
/// banner and the price chart slot.
#[derive(Debug)]
pub struct Page {
    kind: PageKind,
    regions: BTreeMap<Region, String>,
    alert: Option<Alert>,
    chart: ChartSlot,
    selected_symbol: Option<String>,
    symbol_options: Vec<String>,
}

impl Page {
    pub fn new(kind: PageKind) -> Self {
        let regions = kind
            .regions()
            .iter()
            .map(|r| (*r, String::new()))
            .collect();

        Self {
            kind,
            regions,
            alert: None,
            chart: ChartSlot::default(),
            selected_symbol: None,
            symbol_options: Vec::new(),
        }
    }

    pub fn shared(kind: PageKind) -> SharedPage {
        Arc::new(Mutex::new(Self::new(kind)))
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    /// Switches to another screen. Region contents and the chart are dropped;
    /// the alert banner survives navigation.
    pub fn navigate(&mut self, kind: PageKind) {
        let alert = self.alert.take();
        *self = Self::new(kind);
        self.alert = alert;
    }

    pub fn is_mounted(&self, region: Region) -> bool {
        self.regions.contains_key(&region)
    }

    /// Replaces a region's content. Returns `false` and does nothing when the
    /// region is not on this page.
    pub fn set(&mut self, region: Region, content: impl Into<String>) -> bool {
        match self.regions.get_mut(&region) {
            Some(slot) => {
                *slot = content.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Installs `alert`, removing whatever banner was showing.
    pub fn show_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    /// Removes the banner only if it is still the one with `id`.
    pub fn dismiss_alert(&mut self, id: u64) -> bool {
        if self.alert.as_ref().map(|a| a.id) == Some(id) {
            self.alert = None;
            true
        } else {
            false
        }
    }

    pub fn chart(&self) -> &ChartSlot {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut ChartSlot {
        &mut self.chart
    }

    pub fn selected_symbol(&self) -> Option<&str> {
        self.selected_symbol.as_deref()
    }

    pub fn select_symbol(&mut self, symbol: &str) {
        self.selected_symbol = Some(symbol.to_string());
    }

    /// Portfolio symbols listed in the analysis picker after the samples.
    pub fn symbol_options(&self) -> &[String] {
        &self.symbol_options
    }

    pub fn set_symbol_options(&mut self, symbols: Vec<String>) {
        self.symbol_options = symbols;
    }

    /// Text rendering of everything currently visible.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(alert) = &self.alert {
            out.push_str(&format!("[{}] {}\n\n", alert.kind.tag(), alert.message));
        }

        for (region, content) in &self.regions {
            if content.is_empty() {
                continue;
            }
            out.push_str(&format!("== {} ==\n{}\n\n", region.title(), content.trim_end()));
        }

        out
    }
}
