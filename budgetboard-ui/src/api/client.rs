//! HTTP API Client
//!
//! Fetches the dashboard payload from the backend with gloo-net.

use async_trait::async_trait;
use budgetboard::{decode_http, DashboardError, DashboardPayload, DashboardResult, DataSource};
use gloo_net::http::Request;

/// Data source backed by the browser's fetch
pub struct FetchSource {
    url: String,
}

impl FetchSource {
    /// `url` may be relative to the page origin
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl DataSource for FetchSource {
    async fn fetch(&self) -> DashboardResult<DashboardPayload> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::Network(format!("Failed to read body: {}", e)))?;

        decode_http(status, &body)
    }
}
