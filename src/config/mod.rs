// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use std::collections::HashMap;

/// Names an optional config file layered beneath the environment.
pub const CONFIG_FILE_VAR: &str = "SMOKE_CONFIG";

/// Load configuration from the process environment (and `SMOKE_CONFIG`, if set)
pub fn load_config() -> Result<SmokeConfig> {
    let file = std::env::var(CONFIG_FILE_VAR).ok();
    build(file.as_deref(), None)
}

/// Load configuration from an explicit variable map instead of the process environment.
/// Keys are matched case-insensitively, exactly as environment variables are.
pub fn load_config_from_vars(vars: HashMap<String, String>) -> Result<SmokeConfig> {
    let file = vars
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(CONFIG_FILE_VAR))
        .map(|(_, value)| value.clone());
    build(file.as_deref(), Some(vars))
}

fn build(file: Option<&str>, vars: Option<HashMap<String, String>>) -> Result<SmokeConfig> {
    let mut builder = Config::builder()
        .set_default("nginx_host", DEFAULT_HOST)?
        .set_default("port_ok", i64::from(DEFAULT_PORT_OK))?
        .set_default("port_err", i64::from(DEFAULT_PORT_ERR))?
        .set_default("expected_body", DEFAULT_EXPECTED_BODY)?
        .set_default("rate_limit_probe", true)?
        .set_default("rate_limit_requests", i64::from(DEFAULT_RATE_LIMIT_REQUESTS))?;

    if let Some(path) = file {
        tracing::debug!("Layering config file: {}", path);
        builder = builder.add_source(File::with_name(path).required(true));
    }

    let config: SmokeConfig = builder
        .add_source(Environment::default().source(vars))
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Failed to parse configuration")?;

    config.validate()?;
    Ok(config)
}
