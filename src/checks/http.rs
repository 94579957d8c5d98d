// src/checks/http.rs
// Plain GET helpers shared by the endpoint checks.
use super::CheckError;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

pub(crate) struct Fetched {
    pub status: StatusCode,
    pub body: String,
}

/// GET `url` and read the whole body. Transport failures (refused, DNS,
/// timeout, truncated body) all surface as `CheckError::Connectivity`.
pub(crate) async fn fetch(client: &Client, url: &Url) -> Result<Fetched, CheckError> {
    let start = std::time::Instant::now();

    let connectivity = |source: reqwest::Error| CheckError::Connectivity {
        url: url.clone(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(connectivity)?;
    let status = response.status();
    let body = response.text().await.map_err(connectivity)?;

    debug!(
        %url,
        status = status.as_u16(),
        bytes = body.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "received response"
    );

    Ok(Fetched { status, body })
}

pub(crate) fn expect_status(
    url: &Url,
    expected: StatusCode,
    actual: StatusCode,
) -> Result<(), CheckError> {
    if actual == expected {
        Ok(())
    } else {
        Err(CheckError::StatusMismatch {
            url: url.clone(),
            expected: expected.as_u16(),
            actual: actual.as_u16(),
        })
    }
}
