//! Dashboard error types
//!
//! Every way a dashboard load can fail, kept distinct so that a transport
//! failure, a malformed body and a backend-reported failure can be told apart.

use thiserror::Error;

/// Shown when the backend reports `success: false` without an error string
pub const DEFAULT_REJECTION: &str = "Failed to load dashboard data";

/// Shown for every load failure that carries no backend message
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data. Please refresh the page.";

/// Shown when the charting library is not present on the page
pub const CHART_LIBRARY_MESSAGE: &str = "Chart library not loaded. Please refresh the page.";

/// Errors that can occur while loading or rendering the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The request was abandoned after the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response without a usable failure envelope
    #[error("Unexpected HTTP status {status}")]
    Http { status: u16 },

    /// Body is not JSON or does not match the payload schema
    #[error("Malformed dashboard payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    /// The charting library is not loaded on the page
    #[error("Chart library not loaded")]
    ChartLibraryMissing,

    /// The charting library refused the configuration
    #[error("Chart error: {0}")]
    Chart(String),
}

impl DashboardError {
    /// Text for the on-page error banner
    pub fn banner_message(&self) -> String {
        match self {
            DashboardError::Rejected(message) => message.clone(),
            DashboardError::ChartLibraryMissing => CHART_LIBRARY_MESSAGE.to_string(),
            _ => LOAD_FAILED_MESSAGE.to_string(),
        }
    }

    /// Whether the failure happened before a response body was available
    pub fn is_transport(&self) -> bool {
        matches!(self, DashboardError::Network(_) | DashboardError::Timeout)
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
