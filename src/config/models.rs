// src/config/models.rs
use anyhow::{bail, Context, Result};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_HOST: &str = "nginx";
pub const DEFAULT_PORT_OK: u16 = 8080;
pub const DEFAULT_PORT_ERR: u16 = 8081;
pub const DEFAULT_EXPECTED_BODY: &str = "Hello from server 1";
pub const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 20;

/// Everything a smoke run needs, resolved once at startup.
///
/// Field names double as the lowercased environment variable names
/// (`NGINX_HOST`, `PORT_OK`, ...) and as config file keys.
#[derive(Debug, Clone, Deserialize)]
pub struct SmokeConfig {
    #[serde(rename = "nginx_host")]
    pub host: String,
    #[serde(deserialize_with = "decimal")]
    pub port_ok: u16,
    #[serde(deserialize_with = "decimal")]
    pub port_err: u16,
    pub expected_body: String,
    pub rate_limit_probe: bool,
    #[serde(deserialize_with = "decimal")]
    pub rate_limit_requests: u32,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port_ok: DEFAULT_PORT_OK,
            port_err: DEFAULT_PORT_ERR,
            expected_body: DEFAULT_EXPECTED_BODY.to_string(),
            rate_limit_probe: true,
            rate_limit_requests: DEFAULT_RATE_LIMIT_REQUESTS,
            request_timeout_secs: None,
        }
    }
}

impl SmokeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("NGINX_HOST must not be empty");
        }
        if self.port_ok == 0 {
            bail!("PORT_OK must be a non-zero port");
        }
        if self.port_err == 0 {
            bail!("PORT_ERR must be a non-zero port");
        }
        if self.expected_body.is_empty() {
            bail!("EXPECTED_BODY must not be empty");
        }
        if self.rate_limit_probe && self.rate_limit_requests == 0 {
            bail!("RATE_LIMIT_REQUESTS must be at least 1 when the rate limit probe is enabled");
        }

        self.ok_url()?;
        self.err_url()?;
        Ok(())
    }

    /// `http://{host}:{port_ok}/`
    pub fn ok_url(&self) -> Result<Url> {
        self.target_url(self.port_ok)
    }

    /// `http://{host}:{port_err}/`
    pub fn err_url(&self) -> Result<Url> {
        self.target_url(self.port_err)
    }

    /// `None` leaves the client without a timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn target_url(&self, port: u16) -> Result<Url> {
        Url::parse(&format!("http://{}:{}/", self.host, port))
            .with_context(|| format!("Invalid target host {:?}", self.host))
    }
}

/// Accepts native integers (defaults, config files) or decimal text with
/// optional surrounding whitespace. Words the `config` crate would coerce to
/// integers, such as `on` or `true`, are rejected.
fn decimal<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<i64> + TryFrom<u64>,
{
    struct DecimalVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for DecimalVisitor<T>
    where
        T: FromStr + TryFrom<i64> + TryFrom<u64>,
    {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal integer")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
            <T as TryFrom<i64>>::try_from(v)
                .map_err(|_| E::custom(format!("integer {} out of range", v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
            <T as TryFrom<u64>>::try_from(v)
                .map_err(|_| E::custom(format!("integer {} out of range", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
            let digits = v.trim();
            let digits = digits.strip_prefix('+').unwrap_or(digits);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(E::custom(format!("{:?} is not a decimal integer", v)));
            }
            digits
                .parse()
                .map_err(|_| E::custom(format!("{:?} is out of range", v)))
        }
    }

    deserializer.deserialize_any(DecimalVisitor(PhantomData))
}
