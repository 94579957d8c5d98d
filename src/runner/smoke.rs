// src/runner/smoke.rs
use crate::checks::{create_checks, Check, CheckError, CheckOutcome};
use crate::config::SmokeConfig;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct SmokeTest {
    client: Client,
    checks: Vec<Box<dyn Check>>,
}

/// Outcomes of a run in which every check passed, in execution order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl RunReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl SmokeTest {
    pub fn new(config: &SmokeConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self::with_checks(client, create_checks(config)?))
    }

    pub fn with_checks(client: Client, checks: Vec<Box<dyn Check>>) -> Self {
        Self { client, checks }
    }

    /// Run every check in order, stopping at the first failure.
    pub async fn run(&self) -> Result<RunReport, CheckError> {
        let mut report = RunReport::default();

        info!("Starting smoke test run with {} checks", self.checks.len());

        for check in &self.checks {
            println!("{}", check.announce());

            let start = Instant::now();
            debug!(check = check.name(), "Running check");

            match check.run(&self.client).await {
                Ok(outcome) => {
                    info!(
                        check = check.name(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Check passed"
                    );
                    println!("[PASS] {}", outcome.summary);
                    report.outcomes.push(outcome);
                }
                Err(e) => {
                    warn!(
                        check = check.name(),
                        kind = e.kind(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Check failed: {}",
                        e
                    );
                    return Err(e);
                }
            }
        }

        Ok(report)
    }
}
