mod analytics;
mod api;
mod forecast;
mod holding;
mod indicator;
mod price_series;

pub use analytics::{CompositionEntry, PortfolioAnalytics, PortfolioSymbols, RecentPrice, SymbolOption, TopHolding};
pub use api::{ErrorBody, FetchSummary, HealthStatus, UploadReceipt};
pub use forecast::{ModelMetrics, Prediction, PredictionPeriod};
pub use holding::{total_investment, Holding};
pub use indicator::{IndicatorSnapshot, VolatilityLevel};
pub use price_series::PriceSeries;
