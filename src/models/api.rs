use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response of `/fetch/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSummary {
    #[serde(default)]
    pub rows: u64,
    pub symbol: Option<String>,
    pub status: Option<String>,
}

/// Response of `/upload-groww`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    #[serde(deserialize_with = "string_or_number")]
    pub portfolio_id: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Body of a non-2xx response. Either field may carry the human-readable text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
