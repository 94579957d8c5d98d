// src/checks/mod.rs
mod error;
mod error_endpoint;
mod http;
mod ok_endpoint;
mod rate_limit;

pub use error::CheckError;
pub use error_endpoint::ErrorEndpointCheck;
pub use ok_endpoint::OkEndpointCheck;
pub use rate_limit::{is_limited_status, BurstResult, RateLimitProbe, LIMITED_STATUSES};

use crate::config::SmokeConfig;
use async_trait::async_trait;
use reqwest::Client;

/// One step of a smoke run.
#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;

    /// Progress line printed before the check starts.
    fn announce(&self) -> String;

    async fn run(&self, client: &Client) -> Result<CheckOutcome, CheckError>;
}

/// A passed check and the line reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub check: &'static str,
    pub summary: String,
}

impl CheckOutcome {
    pub fn new(check: &'static str, summary: impl Into<String>) -> Self {
        Self {
            check,
            summary: summary.into(),
        }
    }
}

/// The standard sequence: OK endpoint, optional rate-limit probe, error endpoint.
pub fn create_checks(config: &SmokeConfig) -> anyhow::Result<Vec<Box<dyn Check>>> {
    let ok_url = config.ok_url()?;
    let err_url = config.err_url()?;

    let mut checks: Vec<Box<dyn Check>> = vec![Box::new(OkEndpointCheck::new(
        ok_url.clone(),
        config.expected_body.clone(),
    ))];

    if config.rate_limit_probe {
        checks.push(Box::new(RateLimitProbe::new(
            ok_url,
            config.rate_limit_requests,
        )));
    } else {
        tracing::info!("Rate limit probe disabled");
    }

    checks.push(Box::new(ErrorEndpointCheck::new(err_url)));
    Ok(checks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(checks: &[Box<dyn Check>]) -> Vec<&'static str> {
        checks.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_default_sequence_includes_probe() {
        let checks = create_checks(&SmokeConfig::default()).unwrap();
        assert_eq!(names(&checks), ["ok_endpoint", "rate_limit", "error_endpoint"]);
        assert_eq!(checks[0].announce(), "Testing OK endpoint: http://nginx:8080/");
        assert_eq!(
            checks[1].announce(),
            "Testing rate limiting on http://nginx:8080/ with 20 rapid requests..."
        );
        assert_eq!(checks[2].announce(), "Testing error endpoint: http://nginx:8081/");
    }

    #[test]
    fn test_probe_can_be_disabled() {
        let config = SmokeConfig {
            rate_limit_probe: false,
            ..SmokeConfig::default()
        };
        let checks = create_checks(&config).unwrap();
        assert_eq!(names(&checks), ["ok_endpoint", "error_endpoint"]);
    }
}
