// src/main.rs
use anyhow::Result;
use nginx_smoke_test::{config::load_config, runner::SmokeTest};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Diagnostics go to stderr; stdout carries the pass/fail lines CI reads.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nginx_smoke_test=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Invalid configuration propagates and exits non-zero with the error printed.
    let config = load_config()?;
    info!(
        "Loaded configuration: host={} port_ok={} port_err={} rate_limit_probe={}",
        config.host, config.port_ok, config.port_err, config.rate_limit_probe
    );

    let smoke = SmokeTest::new(&config)?;

    match smoke.run().await {
        Ok(report) => {
            info!("{} checks passed", report.len());
            println!("All tests passed");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("[FAIL] {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
