// src/checks/error_endpoint.rs
use super::http::{expect_status, fetch};
use super::{Check, CheckError, CheckOutcome};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// The error port must answer `404 Not Found` and nothing else.
pub struct ErrorEndpointCheck {
    url: Url,
}

impl ErrorEndpointCheck {
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}

#[async_trait]
impl Check for ErrorEndpointCheck {
    fn name(&self) -> &'static str {
        "error_endpoint"
    }

    fn announce(&self) -> String {
        format!("Testing error endpoint: {}", self.url)
    }

    async fn run(&self, client: &Client) -> Result<CheckOutcome, CheckError> {
        let response = fetch(client, &self.url).await?;
        expect_status(&self.url, StatusCode::NOT_FOUND, response.status)?;

        Ok(CheckOutcome::new(
            self.name(),
            format!(
                "Port {} returned expected HTTP 404 error",
                self.url.port_or_known_default().unwrap_or_default()
            ),
        ))
    }
}
