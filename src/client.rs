//! Dashboard HTTP Client
//!
//! reqwest-backed data source for running the controller outside a browser.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::controller::DataSource;
use crate::error::{DashboardError, DashboardResult};
use crate::payload::{decode_http, DashboardPayload};
use crate::settings::DashboardSettings;

/// Fetches the dashboard payload from a running backend
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(config: &ClientConfig, settings: &DashboardSettings) -> DashboardResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DashboardError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: settings.endpoint_url(&config.base_url),
        })
    }

    /// Endpoint this source reads from
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl DataSource for HttpSource {
    async fn fetch(&self) -> DashboardResult<DashboardPayload> {
        tracing::debug!("GET {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(map_transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport)?;

        decode_http(status, &body)
    }
}

fn map_transport(e: reqwest::Error) -> DashboardError {
    if e.is_timeout() {
        DashboardError::Timeout
    } else {
        DashboardError::Network(e.to_string())
    }
}
