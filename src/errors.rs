use reqwest::StatusCode;
use thiserror::Error;

/// Fallback shown when an error response carries neither `message` nor `error`.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Http { status: StatusCode, message: String },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Insufficient data for predictions")]
    InsufficientData { required: usize, actual: usize },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl AppError {
    /// Server-provided (or fallback) text for an HTTP failure, or the plain
    /// description for anything else. This is what user-facing alerts embed.
    pub fn detail(&self) -> String {
        match self {
            AppError::Network(msg) => msg.clone(),
            AppError::Http { message, .. } => message.clone(),
            AppError::Io(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_http(&self) -> bool {
        matches!(self, AppError::Http { .. })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            AppError::Decode(value.to_string())
        } else {
            AppError::Network(value.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Decode(value.to_string())
    }
}
