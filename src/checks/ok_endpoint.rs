// src/checks/ok_endpoint.rs
use super::http::{expect_status, fetch};
use super::{Check, CheckError, CheckOutcome};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// Requires `200 OK` and a body containing the expected marker text.
pub struct OkEndpointCheck {
    url: Url,
    expected_body: String,
}

impl OkEndpointCheck {
    pub fn new(url: Url, expected_body: impl Into<String>) -> Self {
        Self {
            url,
            expected_body: expected_body.into(),
        }
    }
}

#[async_trait]
impl Check for OkEndpointCheck {
    fn name(&self) -> &'static str {
        "ok_endpoint"
    }

    fn announce(&self) -> String {
        format!("Testing OK endpoint: {}", self.url)
    }

    async fn run(&self, client: &Client) -> Result<CheckOutcome, CheckError> {
        let response = fetch(client, &self.url).await?;
        expect_status(&self.url, StatusCode::OK, response.status)?;

        // Exact substring match; no case folding or whitespace normalisation.
        if !response.body.contains(&self.expected_body) {
            return Err(CheckError::ContentMismatch {
                url: self.url.clone(),
                expected: self.expected_body.clone(),
            });
        }

        Ok(CheckOutcome::new(
            self.name(),
            format!(
                "Port {} returned expected HTML and status 200",
                self.url.port_or_known_default().unwrap_or_default()
            ),
        ))
    }
}
