// src/checks/rate_limit.rs
use super::{Check, CheckError, CheckOutcome};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

/// Statuses a rate limiter is expected to answer with once the burst trips it.
pub const LIMITED_STATUSES: [StatusCode; 2] =
    [StatusCode::TOO_MANY_REQUESTS, StatusCode::SERVICE_UNAVAILABLE];

pub fn is_limited_status(status: StatusCode) -> bool {
    LIMITED_STATUSES.contains(&status)
}

/// Fires a burst of sequential GETs and requires at least one to be limited.
pub struct RateLimitProbe {
    url: Url,
    total_requests: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstResult {
    pub limited: u32,
    pub total: u32,
}

impl RateLimitProbe {
    pub fn new(url: Url, total_requests: u32) -> Self {
        Self {
            url,
            total_requests,
        }
    }

    /// Send the burst and count limited responses. Any transport error aborts
    /// immediately; the rest of the burst is not sent.
    pub async fn burst(&self, client: &Client) -> Result<BurstResult, CheckError> {
        let mut limited: u32 = 0;

        let burst_failure = |source: reqwest::Error| CheckError::BurstRequest {
            url: self.url.clone(),
            source,
        };

        for attempt in 1..=self.total_requests {
            let response = client
                .get(self.url.clone())
                .send()
                .await
                .map_err(burst_failure)?;

            let status = response.status();
            // Drain the body so the pooled connection is reused for the next request.
            response.bytes().await.map_err(burst_failure)?;

            if is_limited_status(status) {
                limited += 1;
            }
            debug!(attempt, status = status.as_u16(), limited, "burst response");
        }

        Ok(BurstResult {
            limited,
            total: self.total_requests,
        })
    }
}

#[async_trait]
impl Check for RateLimitProbe {
    fn name(&self) -> &'static str {
        "rate_limit"
    }

    fn announce(&self) -> String {
        format!(
            "Testing rate limiting on {} with {} rapid requests...",
            self.url, self.total_requests
        )
    }

    async fn run(&self, client: &Client) -> Result<CheckOutcome, CheckError> {
        let result = self.burst(client).await?;
        info!(limited = result.limited, total = result.total, "Rate limit burst complete");

        if result.limited == 0 {
            return Err(CheckError::RateLimitNotTriggered {
                total: result.total,
            });
        }

        Ok(CheckOutcome::new(
            self.name(),
            format!(
                "Rate limiting triggered successfully ({}/{} requests were limited)",
                result.limited, result.total
            ),
        ))
    }
}
