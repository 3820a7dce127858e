//! UI Components
//!
//! Leptos components mounted into the server-rendered dashboard.

pub mod banner;
pub mod placeholder;

pub use banner::{ErrorBanner, BANNER_CLASS};
pub use placeholder::NoDataPlaceholder;
