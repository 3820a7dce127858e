//! Dashboard Settings
//!
//! Where the dashboard lives on the page and where its data comes from.
//! Defaults match the server-rendered dashboard template.

use serde::{Deserialize, Serialize};

use crate::format::Currency;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Path of the dashboard data endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Element id of the chart canvas
    #[serde(default = "default_canvas_id")]
    pub canvas_id: String,

    /// Element id given to the error banner
    #[serde(default = "default_banner_id")]
    pub banner_id: String,

    /// Container the banner is inserted into
    #[serde(default = "default_content_selector")]
    pub content_selector: String,

    #[serde(default = "default_total_selector")]
    pub total_selector: String,

    #[serde(default = "default_count_selector")]
    pub count_selector: String,

    #[serde(default = "default_month_selector")]
    pub month_selector: String,

    /// Element id holding embedded JSON on legacy templates
    #[serde(default = "default_embedded_data_id")]
    pub embedded_data_id: String,

    #[serde(default)]
    pub currency: Currency,
}

fn default_endpoint() -> String {
    "/api/dashboard-data".to_string()
}

fn default_canvas_id() -> String {
    "expenseChart".to_string()
}

fn default_banner_id() -> String {
    "dashboard-error".to_string()
}

fn default_content_selector() -> String {
    ".max-w-7xl".to_string()
}

fn default_total_selector() -> String {
    ".total-expenses".to_string()
}

fn default_count_selector() -> String {
    ".category-count".to_string()
}

fn default_month_selector() -> String {
    ".this-month".to_string()
}

fn default_embedded_data_id() -> String {
    "expense-data".to_string()
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            canvas_id: default_canvas_id(),
            banner_id: default_banner_id(),
            content_selector: default_content_selector(),
            total_selector: default_total_selector(),
            count_selector: default_count_selector(),
            month_selector: default_month_selector(),
            embedded_data_id: default_embedded_data_id(),
            currency: Currency::default(),
        }
    }
}

impl DashboardSettings {
    /// Full endpoint URL below `base_url` (empty base keeps the path relative)
    pub fn endpoint_url(&self, base_url: &str) -> String {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            return self.endpoint.clone();
        }
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}
