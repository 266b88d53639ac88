use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::commands::{Command, HELP};
use crate::config::ClientConfig;
use crate::controller::DashboardController;
use crate::errors::AppError;
use crate::external::dashboard_api::DashboardApi;
use crate::interaction::Interaction;
use crate::services::job_scheduler_service::{JobSchedulerService, RefreshIntervals};
use crate::services::request_tokens::RequestTokens;
use crate::state::AppState;
use crate::view::{Notifier, Page, PageKind, Region, SharedPage};

/// A running dashboard: page, controller and refresh jobs.
pub struct App {
    controller: DashboardController,
    scheduler: JobSchedulerService,
    page: SharedPage,
}

impl App {
    pub async fn start(
        config: &ClientConfig,
        api: Arc<dyn DashboardApi>,
        interaction: Arc<dyn Interaction>,
    ) -> Result<Self, AppError> {
        Self::start_with_rng(config, api, interaction, StdRng::from_os_rng()).await
    }

    /// Like [`App::start`] with a caller-chosen jitter source.
    pub async fn start_with_rng(
        config: &ClientConfig,
        api: Arc<dyn DashboardApi>,
        interaction: Arc<dyn Interaction>,
        rng: StdRng,
    ) -> Result<Self, AppError> {
        let page = Page::shared(config.page);
        let state = AppState {
            api,
            notifier: Notifier::new(page.clone(), config.alert_ttl),
            page: page.clone(),
            tokens: RequestTokens::new(),
            interaction,
            rng: Arc::new(Mutex::new(rng)),
            training_delay: config.training_delay,
        };
        let controller = DashboardController::new(state);

        let mut scheduler = JobSchedulerService::new(controller.clone()).await?;

        let app = Self {
            controller,
            scheduler: {
                scheduler
                    .start(RefreshIntervals {
                        holdings: config.holdings_refresh,
                        dashboard_stats: config.stats_refresh,
                    })
                    .await?;
                scheduler
            },
            page,
        };

        info!("📊 Dashboard started on the {} page", config.page);
        app.on_page_loaded().await;
        Ok(app)
    }

    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// Initial loads for whatever regions the current page mounts.
    pub async fn on_page_loaded(&self) {
        let mounted = |region| self.page.lock().is_mounted(region);

        if mounted(Region::HoldingsContainer) {
            self.controller.refresh_holdings().await;
        }
        if mounted(Region::DashboardStats) {
            self.controller.update_dashboard_stats().await;
        }
        if mounted(Region::PortfolioValue) {
            self.controller.load_portfolio_analytics().await;
        }
        if mounted(Region::SymbolPicker) {
            self.controller.load_portfolio_symbols().await;
        }
        if mounted(Region::ModelMetrics) {
            self.controller.update_performance_metrics();
        }
        if mounted(Region::RecentData) {
            self.controller.load_recent_data().await;
        }
    }

    pub async fn navigate(&self, kind: PageKind) {
        info!("Navigating to {}", kind);
        self.page.lock().navigate(kind);
        self.on_page_loaded().await;
    }

    /// Runs one command. Returns `false` once the user asked to quit.
    pub async fn dispatch(&self, command: Command) -> bool {
        let c = &self.controller;
        match command {
            Command::Fetch(symbol) => c.handle_fetch_command(symbol.as_deref()).await,
            Command::Upload(path) => c.handle_file_upload(&path).await,
            Command::Holdings => {
                c.refresh_holdings().await;
            }
            Command::Clear => c.clear_portfolio().await,
            Command::Stats => {
                c.update_dashboard_stats().await;
            }
            Command::Analytics => c.load_portfolio_analytics().await,
            Command::Symbols => c.load_portfolio_symbols().await,
            Command::Analyze(symbol) => c.analyze_stock(&symbol).await,
            Command::Predict(symbol) => c.generate_predictions(symbol.as_deref()).await,
            Command::Train => c.train_model().await,
            Command::Recent => c.load_recent_data().await,
            Command::Page(kind) => self.navigate(kind).await,
            Command::Help => println!("{}", HELP),
            Command::Quit => return false,
        }
        true
    }

    pub fn render(&self) -> String {
        self.page.lock().render()
    }

    /// Stops the refresh jobs.
    pub async fn shutdown(mut self) -> Result<(), AppError> {
        self.scheduler.stop().await
    }
}
