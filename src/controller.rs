use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::errors::AppError;
use crate::models::{ModelMetrics, Prediction, PriceSeries};
use crate::services::forecasting_service;
use crate::services::indicators;
use crate::services::request_tokens::{Operation, RequestToken};
use crate::state::AppState;
use crate::view::chart::render_composition;
use crate::view::format::{format_currency, format_number};
use crate::view::render;
use crate::view::{Page, Region};

static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Cc}").expect("control character pattern"));

const SYMBOL_PROMPT: &str = "Enter stock symbol (e.g., TCS.NS):";
const CLEAR_CONFIRMATION: &str =
    "Are you sure you want to clear your entire portfolio? This action cannot be undone.";
const ANALYTICS_FAILED: &str = "Failed to load portfolio data. Please try refreshing the page.";

/// Trims a symbol and rejects empty or unprintable input. Anything else is
/// passed through: the backend also serves names like `Tata Motors` and
/// tickers like `USDINR=X`, and the URL segment is escaped on the way out.
pub fn validate_symbol(raw: &str) -> Result<String, AppError> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        return Err(AppError::Validation("symbol must not be empty".into()));
    }
    if CONTROL_CHARS.is_match(symbol) {
        return Err(AppError::Validation(format!("invalid symbol '{}'", symbol)));
    }
    Ok(symbol.to_string())
}

/// Wires user commands and periodic jobs to backend calls and page updates.
///
/// No operation returns an error: failures become an alert (user-initiated
/// operations) or a log line (background refreshes). Nothing is retried and
/// nothing is de-duplicated; responses from superseded requests are dropped.
#[derive(Clone)]
pub struct DashboardController {
    state: AppState,
}

impl DashboardController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs `apply` against the page only if `token` is still the newest
    /// request of its operation.
    fn apply_if_current<F>(&self, token: RequestToken, apply: F) -> bool
    where
        F: FnOnce(&mut Page),
    {
        if !self.state.tokens.is_current(token) {
            debug!(
                "Discarding stale {:?} response (generation {})",
                token.operation, token.generation
            );
            return false;
        }
        apply(&mut self.state.page.lock());
        true
    }

    /// Fetch command: prompts for a symbol when none was given.
    pub async fn handle_fetch_command(&self, symbol: Option<&str>) {
        let symbol = match symbol {
            Some(s) => Some(s.to_string()),
            None => self.state.interaction.prompt(SYMBOL_PROMPT),
        };

        match symbol {
            Some(s) if !s.trim().is_empty() => self.fetch_stock(&s).await,
            _ => debug!("Fetch cancelled, no symbol entered"),
        }
    }

    /// Asks the backend to pull fresh prices for `symbol`, then refreshes
    /// holdings on success.
    pub async fn fetch_stock(&self, symbol: &str) {
        let notifier = &self.state.notifier;
        let symbol = match validate_symbol(symbol) {
            Ok(s) => s,
            Err(e) => {
                notifier.error(e.detail());
                return;
            }
        };

        notifier.loading(format!("Fetching {}...", symbol));

        match self.state.api.fetch_symbol(&symbol).await {
            Ok(summary) => {
                info!("✓ Fetched {} rows for {}", summary.rows, symbol);
                notifier.success(format!(
                    "Successfully fetched {} records for {}",
                    summary.rows, symbol
                ));
                self.refresh_holdings().await;
            }
            Err(e) if e.is_http() => {
                warn!("Fetch for {} rejected: {}", symbol, e);
                notifier.error(format!("Failed to fetch {}: {}", symbol, e.detail()));
            }
            Err(e) => {
                error!("✗ Fetch for {} failed: {}", symbol, e);
                notifier.error(format!("Network error: {}", e.detail()));
            }
        }
    }

    /// Uploads a brokerage statement from disk.
    pub async fn handle_file_upload(&self, path: &Path) {
        let notifier = &self.state.notifier;

        let contents = match tokio::fs::read(path).await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                notifier.error(format!("Upload error: {}", e));
                return;
            }
        };
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("portfolio.csv")
            .to_string();

        notifier.loading("Uploading portfolio...");

        match self.state.api.upload_portfolio(&file_name, contents).await {
            Ok(receipt) => {
                info!("📥 Imported {} as portfolio {}", file_name, receipt.portfolio_id);
                notifier.success(format!(
                    "Portfolio imported successfully! Portfolio ID: {}",
                    receipt.portfolio_id
                ));
                self.refresh_holdings().await;
            }
            Err(e) if e.is_http() => {
                warn!("Upload of {} rejected: {}", file_name, e);
                notifier.error(format!("Upload failed: {}", e.detail()));
            }
            Err(e) => {
                error!("✗ Upload of {} failed: {}", file_name, e);
                notifier.error(format!("Upload error: {}", e.detail()));
            }
        }
    }

    /// Re-renders the holdings region. Background operation: failures are
    /// only logged. Returns whether the page was updated.
    pub async fn refresh_holdings(&self) -> bool {
        let token = self.state.tokens.begin(Operation::Holdings);

        match self.state.api.holdings().await {
            Ok(holdings) => {
                let mut rendered = false;
                self.apply_if_current(token, |page| {
                    rendered = page.set(Region::HoldingsContainer, render::render_holdings(&holdings));
                });
                rendered
            }
            Err(e) => {
                warn!("Failed to refresh holdings: {}", e);
                false
            }
        }
    }

    /// Clears the whole portfolio after confirmation.
    pub async fn clear_portfolio(&self) {
        if !self.state.interaction.confirm(CLEAR_CONFIRMATION) {
            debug!("Clear portfolio declined");
            return;
        }

        let notifier = &self.state.notifier;
        notifier.loading("Clearing portfolio...");

        match self.state.api.clear_portfolio().await {
            Ok(()) => {
                info!("🧹 Portfolio cleared");
                notifier.success("Portfolio cleared successfully!");
                self.refresh_holdings().await;

                let has_stats = self.state.page.lock().is_mounted(Region::DashboardStats);
                if has_stats {
                    self.update_dashboard_stats().await;
                }
            }
            Err(e) if e.is_http() => {
                warn!("Clear portfolio rejected: {}", e);
                notifier.error(format!("Failed to clear portfolio: {}", e.detail()));
            }
            Err(e) => {
                error!("✗ Clear portfolio failed: {}", e);
                notifier.error(format!("Error: {}", e.detail()));
            }
        }
    }

    /// `true` only for a reachable backend answering `{"status": "ok"}`.
    pub async fn health_status(&self) -> bool {
        match self.state.api.health().await {
            Ok(status) => status.is_ok(),
            Err(e) => {
                debug!("Health check failed: {}", e);
                false
            }
        }
    }

    /// Fetches health and holdings together and renders the three stat
    /// cards. If the holdings fetch fails the whole update is abandoned.
    pub async fn update_dashboard_stats(&self) -> bool {
        let token = self.state.tokens.begin(Operation::DashboardStats);

        let health = async { Ok::<bool, AppError>(self.health_status().await) };
        let holdings = self.state.api.holdings();

        match futures::future::try_join(health, holdings).await {
            Ok((online, holdings)) => {
                let mut rendered = false;
                self.apply_if_current(token, |page| {
                    rendered = page.set(
                        Region::DashboardStats,
                        render::render_dashboard_stats(&holdings, online),
                    );
                });
                rendered
            }
            Err(e) => {
                error!("Failed to update dashboard stats: {}", e);
                false
            }
        }
    }

    /// Fills the analytics page from the server-side portfolio summary.
    pub async fn load_portfolio_analytics(&self) {
        let token = self.state.tokens.begin(Operation::PortfolioAnalytics);

        match self.state.api.portfolio_analytics().await {
            Ok(data) => {
                self.apply_if_current(token, |page| match data.total_value {
                    Some(total) => {
                        page.set(Region::PortfolioValue, format_currency(total));
                        page.set(
                            Region::PortfolioStocks,
                            format_number(data.total_stocks),
                        );
                        page.set(
                            Region::AvgPosition,
                            data.average_position()
                                .map(format_currency)
                                .unwrap_or_else(|| "N/A".to_string()),
                        );

                        if !data.composition.is_empty() {
                            page.set(
                                Region::CompositionChart,
                                render_composition(&data.composition),
                            );
                            page.set(
                                Region::HoldingsTable,
                                render::render_composition_table(&data.composition),
                            );
                        }

                        if !data.top_holdings.is_empty() {
                            page.set(Region::TopHoldings, render::render_top_holdings(&data.top_holdings));
                        }
                    }
                    None => {
                        warn!("Portfolio analytics payload has no total_value");
                        for region in [Region::PortfolioValue, Region::PortfolioStocks, Region::AvgPosition] {
                            page.set(region, render::NO_DATA);
                        }
                    }
                });
            }
            Err(e) => {
                error!("Error loading portfolio analytics: {}", e);
                if self.state.tokens.is_current(token) {
                    self.state.notifier.error(ANALYTICS_FAILED);
                }
            }
        }
    }

    /// Fills the analysis picker: sample symbols first, then the portfolio's
    /// own symbols, sorted and unique. Only samples on failure.
    pub async fn load_portfolio_symbols(&self) {
        let token = self.state.tokens.begin(Operation::PortfolioSymbols);

        let symbols = match self.state.api.portfolio_symbols().await {
            Ok(s) => {
                let symbols = s.unique_sorted();
                info!(
                    "Loaded {} test stocks + {} portfolio symbols",
                    render::TEST_SYMBOLS.len(),
                    symbols.len()
                );
                symbols
            }
            Err(e) => {
                error!("Error loading portfolio symbols: {}", e);
                Vec::new()
            }
        };

        self.apply_if_current(token, |page| {
            page.set_symbol_options(symbols);
            render_picker(page);
        });
    }

    /// Selects `symbol` in the picker and loads its analysis.
    pub async fn analyze_stock(&self, symbol: &str) {
        self.load_analysis(symbol).await;
    }

    /// Price chart plus indicator panel for one symbol.
    pub async fn load_analysis(&self, symbol: &str) {
        let symbol = match validate_symbol(symbol) {
            Ok(s) => s,
            Err(_) => {
                self.state.notifier.error("Please select a stock to analyze");
                return;
            }
        };

        info!("Loading analysis for {}", symbol);
        let token = self.state.tokens.begin(Operation::Analysis);

        {
            let mut page = self.state.page.lock();
            page.select_symbol(&symbol);
            render_picker(&mut page);
            page.set(Region::PriceChart, render::LOADING_CHART);
            page.set(Region::Indicators, render::render_indicators_loading());
        }

        match self.state.api.chart(&symbol).await {
            Ok(series) => {
                self.apply_if_current(token, |page| show_analysis(page, &series));
            }
            Err(e) => {
                error!("Error loading analysis for {}: {}", symbol, e);
                let message = if e.is_http() {
                    "Failed to fetch chart data".to_string()
                } else {
                    e.detail()
                };
                self.apply_if_current(token, |page| {
                    page.set(Region::PriceChart, render::render_chart_error(&message));
                });
            }
        }
    }

    /// Heuristic predictions for `symbol`, or for the symbol last analyzed.
    pub async fn generate_predictions(&self, symbol: Option<&str>) {
        let notifier = &self.state.notifier;

        let selected = match symbol {
            Some(s) => Some(s.to_string()),
            None => self.state.page.lock().selected_symbol().map(str::to_string),
        };
        let symbol = match selected.as_deref().map(validate_symbol) {
            Some(Ok(s)) => s,
            _ => {
                notifier.error("Please select a stock first to generate predictions");
                return;
            }
        };

        notifier.loading("Generating AI predictions...");
        let token = self.state.tokens.begin(Operation::Predictions);

        let outcome = match self.state.api.chart(&symbol).await {
            Ok(series) => self.predict(&series),
            Err(e) if e.is_http() => Err(AppError::Validation("Failed to fetch stock data".into())),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((predictions, metrics)) => {
                let applied = self.apply_if_current(token, |page| {
                    page.set(Region::Predictions, render::render_predictions(&predictions));
                    page.set(Region::ModelMetrics, render::render_model_metrics(&metrics));
                });
                if applied {
                    info!("🔮 Predictions generated for {}", symbol);
                    notifier.success(format!("Predictions generated for {}", symbol));
                }
            }
            Err(e) => {
                error!("Error generating predictions for {}: {}", symbol, e);
                let detail = match &e {
                    AppError::Validation(msg) => msg.clone(),
                    other => other.detail(),
                };
                notifier.error(format!("Failed to generate predictions: {}", detail));
            }
        }
    }

    fn predict(&self, series: &PriceSeries) -> Result<(Vec<Prediction>, ModelMetrics), AppError> {
        let mut rng = self.state.rng.lock();
        let predictions = forecasting_service::forecast(&series.prices, &mut *rng)?;
        let metrics = forecasting_service::model_metrics(&mut *rng);
        Ok((predictions, metrics))
    }

    /// Pretends to retrain the prediction model, then refreshes the metrics.
    pub async fn train_model(&self) {
        let notifier = &self.state.notifier;
        notifier.loading("Training new model... This may take a few minutes.");

        tokio::time::sleep(self.state.training_delay).await;
        self.update_performance_metrics();

        notifier.success("Model training completed successfully! Performance metrics updated.");
    }

    /// Re-rolls the simulated model performance bars.
    pub fn update_performance_metrics(&self) {
        let metrics = forecasting_service::model_metrics(&mut *self.state.rng.lock());
        self.state
            .page
            .lock()
            .set(Region::ModelMetrics, render::render_model_metrics(&metrics));
    }

    /// Latest stored bars across all symbols. Failures are only logged.
    pub async fn load_recent_data(&self) {
        let token = self.state.tokens.begin(Operation::RecentData);

        match self.state.api.recent_data().await {
            Ok(rows) => {
                self.apply_if_current(token, |page| {
                    page.set(Region::RecentData, render::render_recent_data(&rows));
                });
            }
            Err(e) => warn!("Failed to load recent data: {}", e),
        }
    }
}

fn render_picker(page: &mut Page) {
    if !page.is_mounted(Region::SymbolPicker) {
        return;
    }
    let text = render::render_symbol_picker(page.symbol_options(), page.selected_symbol());
    page.set(Region::SymbolPicker, text);
}

fn show_analysis(page: &mut Page, series: &PriceSeries) {
    if page.is_mounted(Region::PriceChart) {
        page.chart_mut().replace(series);
        if let Some(chart) = page.chart().render() {
            page.set(Region::PriceChart, chart);
        }
    }

    // An empty series leaves the loading placeholders in place
    if let Some(snapshot) = indicators::indicator_snapshot(series) {
        page.set(Region::Indicators, render::render_indicators(&snapshot));
    }
}
