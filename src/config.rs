use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::errors::AppError;
use crate::view::PageKind;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Runtime settings for the dashboard client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub page: PageKind,
    pub holdings_refresh: Duration,
    pub stats_refresh: Duration,
    pub alert_ttl: Duration,
    pub request_timeout: Duration,
    pub training_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // Constant literal, always parses
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url"),
            page: PageKind::Dashboard,
            holdings_refresh: Duration::from_secs(30),
            stats_refresh: Duration::from_secs(60),
            alert_ttl: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            training_delay: Duration::from_secs(3),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("STOCKDASH_BASE_URL") {
            Some(raw) => Url::parse(raw.trim())
                .map_err(|e| AppError::Config(format!("STOCKDASH_BASE_URL: {}", e)))?,
            None => defaults.base_url,
        };

        let page = match lookup("STOCKDASH_PAGE") {
            Some(raw) => PageKind::from_str(raw.trim())
                .map_err(|e| AppError::Config(format!("STOCKDASH_PAGE: {}", e)))?,
            None => defaults.page,
        };

        Ok(Self {
            base_url,
            page,
            holdings_refresh: secs(&lookup, "STOCKDASH_HOLDINGS_REFRESH_SECS", defaults.holdings_refresh)?,
            stats_refresh: secs(&lookup, "STOCKDASH_STATS_REFRESH_SECS", defaults.stats_refresh)?,
            alert_ttl: secs(&lookup, "STOCKDASH_ALERT_SECS", defaults.alert_ttl)?,
            request_timeout: secs(&lookup, "STOCKDASH_REQUEST_TIMEOUT_SECS", defaults.request_timeout)?,
            training_delay: secs(&lookup, "STOCKDASH_TRAINING_SECS", defaults.training_delay)?,
        })
    }
}

fn secs<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| AppError::Config(format!("{}: {}", key, e))),
        None => Ok(default),
    }
}
