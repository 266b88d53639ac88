use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::errors::{AppError, UNKNOWN_ERROR};
use crate::external::dashboard_api::DashboardApi;
use crate::models::{
    ErrorBody, FetchSummary, HealthStatus, Holding, PortfolioAnalytics, PortfolioSymbols,
    PriceSeries, RecentPrice, UploadReceipt,
};

/// reqwest-backed client for the portfolio backend.
pub struct HttpDashboardApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDashboardApi {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        decode(resp).await
    }
}

/// Decodes a success body, or turns a failure status into `AppError::Http`
/// using the server's message when it sent one.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let raw = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&raw)
        .ok()
        .and_then(|body| body.text().map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

    warn!("Backend returned {}: {}", status, message);
    Err(AppError::Http { status, message })
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_symbol(&self, symbol: &str) -> Result<FetchSummary, AppError> {
        self.get_json(&["fetch", symbol]).await
    }

    async fn upload_portfolio(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadReceipt, AppError> {
        let url = self.endpoint(&["upload-groww"])?;
        let form = Form::new().part("file", Part::bytes(contents).file_name(file_name.to_string()));

        debug!("POST {} ({})", url, file_name);
        let resp = self.client.post(url).multipart(form).send().await?;
        decode(resp).await
    }

    async fn holdings(&self) -> Result<Vec<Holding>, AppError> {
        self.get_json(&["holdings"]).await
    }

    async fn clear_portfolio(&self) -> Result<(), AppError> {
        let url = self.endpoint(&["clear-portfolio"])?;
        debug!("POST {}", url);
        let resp = self.client.post(url).send().await?;
        // Body is `{}` on success; its contents carry nothing
        decode::<serde_json::Value>(resp).await.map(|_| ())
    }

    async fn health(&self) -> Result<HealthStatus, AppError> {
        self.get_json(&["health"]).await
    }

    async fn portfolio_analytics(&self) -> Result<PortfolioAnalytics, AppError> {
        self.get_json(&["api", "portfolio-analytics"]).await
    }

    async fn portfolio_symbols(&self) -> Result<PortfolioSymbols, AppError> {
        self.get_json(&["api", "portfolio-symbols"]).await
    }

    async fn chart(&self, symbol: &str) -> Result<PriceSeries, AppError> {
        let series: PriceSeries = self.get_json(&["api", "chart", symbol]).await?;
        series.validate()
    }

    async fn recent_data(&self) -> Result<Vec<RecentPrice>, AppError> {
        self.get_json(&["api", "recent-data"]).await
    }
}
