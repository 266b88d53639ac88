use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{
    FetchSummary, HealthStatus, Holding, PortfolioAnalytics, PortfolioSymbols, PriceSeries,
    RecentPrice, UploadReceipt,
};

/// The portfolio backend as seen by the dashboard.
///
/// Every method is a single request with no retry. Non-2xx responses come
/// back as `AppError::Http` carrying the server's `message`/`error` text.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /fetch/{symbol}`: ask the backend to pull fresh prices.
    async fn fetch_symbol(&self, symbol: &str) -> Result<FetchSummary, AppError>;

    /// `POST /upload-groww` with the statement as multipart field `file`.
    async fn upload_portfolio(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadReceipt, AppError>;

    async fn holdings(&self) -> Result<Vec<Holding>, AppError>;

    async fn clear_portfolio(&self) -> Result<(), AppError>;

    async fn health(&self) -> Result<HealthStatus, AppError>;

    async fn portfolio_analytics(&self) -> Result<PortfolioAnalytics, AppError>;

    async fn portfolio_symbols(&self) -> Result<PortfolioSymbols, AppError>;

    /// `GET /api/chart/{symbol}`: close prices, oldest first.
    async fn chart(&self, symbol: &str) -> Result<PriceSeries, AppError>;

    async fn recent_data(&self) -> Result<Vec<RecentPrice>, AppError>;
}
