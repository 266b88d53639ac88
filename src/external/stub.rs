//! Canned backend used by the controller and job tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::errors::AppError;
use crate::external::dashboard_api::DashboardApi;
use crate::models::{
    FetchSummary, HealthStatus, Holding, PortfolioAnalytics, PortfolioSymbols, PriceSeries,
    RecentPrice, SymbolOption, UploadReceipt,
};

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Http(u16, String),
    Network(String),
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T, AppError> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Http(code, message) => Err(AppError::Http {
                status: StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message: message.clone(),
            }),
            Reply::Network(msg) => Err(AppError::Network(msg.clone())),
        }
    }
}

pub struct StubDashboardApi {
    pub fetch: Mutex<Reply<u64>>,
    pub upload: Mutex<Reply<String>>,
    pub holdings: Mutex<Reply<Vec<Holding>>>,
    pub clear: Mutex<Reply<()>>,
    pub health: Mutex<Reply<String>>,
    pub analytics: Mutex<Reply<PortfolioAnalytics>>,
    pub symbols: Mutex<Reply<Vec<String>>>,
    pub charts: Mutex<HashMap<String, Reply<PriceSeries>>>,
    pub chart_delays: Mutex<HashMap<String, Duration>>,
    pub recent: Mutex<Reply<Vec<RecentPrice>>>,
    pub fetch_calls: AtomicUsize,
    pub holdings_calls: AtomicUsize,
    pub clear_calls: AtomicUsize,
    pub chart_calls: AtomicUsize,
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl Default for StubDashboardApi {
    fn default() -> Self {
        Self {
            fetch: Mutex::new(Reply::Ok(0)),
            upload: Mutex::new(Reply::Ok("1".to_string())),
            holdings: Mutex::new(Reply::Ok(Vec::new())),
            clear: Mutex::new(Reply::Ok(())),
            health: Mutex::new(Reply::Ok("ok".to_string())),
            analytics: Mutex::new(Reply::Ok(PortfolioAnalytics {
                total_value: None,
                total_stocks: 0.0,
                composition: Vec::new(),
                top_holdings: Vec::new(),
            })),
            symbols: Mutex::new(Reply::Ok(Vec::new())),
            charts: Mutex::new(HashMap::new()),
            chart_delays: Mutex::new(HashMap::new()),
            recent: Mutex::new(Reply::Ok(Vec::new())),
            fetch_calls: AtomicUsize::new(0),
            holdings_calls: AtomicUsize::new(0),
            clear_calls: AtomicUsize::new(0),
            chart_calls: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
        }
    }
}

impl StubDashboardApi {
    pub fn with_holdings(holdings: Vec<Holding>) -> Self {
        let stub = Self::default();
        *stub.holdings.lock() = Reply::Ok(holdings);
        stub
    }

    pub fn set_chart(&self, series: PriceSeries) {
        self.charts.lock().insert(series.symbol.clone(), Reply::Ok(series));
    }
}

#[async_trait]
impl DashboardApi for StubDashboardApi {
    async fn fetch_symbol(&self, symbol: &str) -> Result<FetchSummary, AppError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.fetch.lock().get()?;
        Ok(FetchSummary {
            rows,
            symbol: Some(symbol.to_string()),
            status: Some("fetched".to_string()),
        })
    }

    async fn upload_portfolio(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadReceipt, AppError> {
        self.uploads.lock().push((file_name.to_string(), contents));
        let portfolio_id = self.upload.lock().get()?;
        Ok(UploadReceipt {
            portfolio_id,
            status: Some("imported".to_string()),
        })
    }

    async fn holdings(&self) -> Result<Vec<Holding>, AppError> {
        self.holdings_calls.fetch_add(1, Ordering::SeqCst);
        self.holdings.lock().get()
    }

    async fn clear_portfolio(&self) -> Result<(), AppError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.clear.lock().get()
    }

    async fn health(&self) -> Result<HealthStatus, AppError> {
        let status = self.health.lock().get()?;
        Ok(HealthStatus { status })
    }

    async fn portfolio_analytics(&self) -> Result<PortfolioAnalytics, AppError> {
        self.analytics.lock().get()
    }

    async fn portfolio_symbols(&self) -> Result<PortfolioSymbols, AppError> {
        let symbols = self.symbols.lock().get()?;
        Ok(PortfolioSymbols {
            value: symbols.into_iter().map(|value| SymbolOption { value }).collect(),
        })
    }

    async fn chart(&self, symbol: &str) -> Result<PriceSeries, AppError> {
        self.chart_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.chart_delays.lock().get(symbol).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self.charts.lock().get(symbol).cloned();
        match reply {
            Some(reply) => reply.get(),
            None => Err(AppError::Http {
                status: StatusCode::NOT_FOUND,
                message: format!("No data found for {}", symbol),
            }),
        }
    }

    async fn recent_data(&self) -> Result<Vec<RecentPrice>, AppError> {
        self.recent.lock().get()
    }
}
