// src/checks/error.rs
use url::Url;

/// Every way a smoke check can fail. Each one ends the run.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Could not connect to {url}: {source}")]
    Connectivity {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("Expected status {expected} from {url}, got {actual}")]
    StatusMismatch { url: Url, expected: u16, actual: u16 },

    #[error("Expected custom HTML content {expected:?} not found in response from {url}")]
    ContentMismatch { url: Url, expected: String },

    #[error("Rate limit test request failed: {source}")]
    BurstRequest {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("Rate limiting did not trigger (expected at least one 503/429 response in {total} requests).")]
    RateLimitNotTriggered { total: u32 },
}

impl CheckError {
    /// Short machine-friendly label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::Connectivity { .. } => "connectivity",
            CheckError::StatusMismatch { .. } => "status_mismatch",
            CheckError::ContentMismatch { .. } => "content_mismatch",
            CheckError::BurstRequest { .. } => "burst_request",
            CheckError::RateLimitNotTriggered { .. } => "rate_limit_not_triggered",
        }
    }
}
