//! # Budgetboard
//!
//! Budget dashboard controller - loads aggregated spending from the backend,
//! writes the summary figures and draws spending by category as a bar chart.
//!
//! ## Modules
//!
//! - [`payload`]: Endpoint response types and strict decoding
//! - [`controller`]: The dashboard controller and its page/data/chart seams
//! - [`chart`]: Bar-chart configuration and palettes
//! - [`headless`]: In-memory page and chart implementations
//! - `client`, `config`, `server`: native tooling (feature `cli`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use budgetboard::client::HttpSource;
//! use budgetboard::config::Config;
//! use budgetboard::headless::{MemoryPage, RecordingCharts};
//! use budgetboard::DashboardController;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let settings = config.dashboard.clone();
//!
//!     let controller = DashboardController::new(
//!         HttpSource::new(&config.client, &settings)?,
//!         MemoryPage::dashboard(&settings),
//!         RecordingCharts::new(),
//!         settings,
//!     );
//!     controller.initialize().await;
//!
//!     println!("{:?}", controller.page().text(".total-expenses"));
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod controller;
pub mod error;
pub mod format;
pub mod headless;
pub mod payload;
pub mod settings;

#[cfg(feature = "cli")]
pub mod client;
#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod server;

pub use chart::{ChartConfig, Palette, Swatch};
pub use controller::{ChartBackend, ChartHandle, DashboardController, DashboardPage, DataSource};
pub use error::{DashboardError, DashboardResult};
pub use format::Currency;
pub use payload::{
    decode_embedded, decode_http, decode_response, CategoryTotal, DashboardPayload,
    DashboardResponse,
};
pub use settings::DashboardSettings;
