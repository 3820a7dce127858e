//! Dashboard Controller
//!
//! Orchestrates one dashboard page session: load the data, write the stats,
//! (re)build the chart and surface failures as a banner.
//!
//! The page, the data source and the charting library are seams so the same
//! controller drives the browser frontend, the CLI preview and the tests.
//!
//! ## Lifecycle
//!
//! 1. `start()` picks the embedded-data path when the page carries its own
//!    data, the fetch path otherwise
//! 2. Either path runs at most once per controller (the initialization flag
//!    is set before the first await)
//! 3. Every chart goes through `render_chart`, which destroys the previous
//!    handle before creating a new one
//! 4. `teardown()` releases the chart whether or not loading finished

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use tracing::{debug, error, info, warn};

use crate::chart::{ChartConfig, Palette};
use crate::error::{DashboardError, DashboardResult};
use crate::payload::{decode_embedded, CategoryTotal, DashboardPayload};
use crate::settings::DashboardSettings;

/// Where dashboard data comes from
#[async_trait(?Send)]
pub trait DataSource {
    /// Fetch and decode one dashboard payload
    async fn fetch(&self) -> DashboardResult<DashboardPayload>;
}

/// The page the dashboard is drawn on
pub trait DashboardPage {
    /// Whether an element with this id exists
    fn element_exists(&self, id: &str) -> bool;

    /// Set the text of the first element matching `selector`.
    /// Returns false when nothing matches.
    fn set_text(&self, selector: &str, text: &str) -> bool;

    /// Replace the content around the chart canvas with the no-data placeholder
    fn show_empty_state(&self, canvas_id: &str);

    /// Create an empty banner element as the first child of the container.
    /// Returns false when the container is missing.
    fn insert_banner(&self, banner_id: &str, container_selector: &str) -> bool;

    /// Fill the banner with `message` and a retry control
    fn render_banner(&self, banner_id: &str, message: &str);

    /// Raw text of an element carrying embedded JSON
    fn embedded_data(&self, id: &str) -> Option<String>;
}

/// A charting library able to draw a configuration onto a canvas
pub trait ChartBackend {
    type Handle: ChartHandle;

    /// Whether the library is present
    fn is_loaded(&self) -> bool;

    /// Build a chart on the canvas with id `canvas_id`
    fn create(&self, canvas_id: &str, config: &ChartConfig) -> DashboardResult<Self::Handle>;
}

/// A live chart instance
pub trait ChartHandle {
    /// Release the chart and everything it holds on the canvas
    fn destroy(self);
}

/// Controller for one dashboard page session
pub struct DashboardController<S, P, C: ChartBackend> {
    source: S,
    page: P,
    charts: C,
    settings: DashboardSettings,
    initialized: Cell<bool>,
    chart: RefCell<Option<C::Handle>>,
}

impl<S, P, C> DashboardController<S, P, C>
where
    S: DataSource,
    P: DashboardPage,
    C: ChartBackend,
{
    pub fn new(source: S, page: P, charts: C, settings: DashboardSettings) -> Self {
        Self {
            source,
            page,
            charts,
            settings,
            initialized: Cell::new(false),
            chart: RefCell::new(None),
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn charts(&self) -> &C {
        &self.charts
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Whether a chart handle is currently held
    pub fn has_chart(&self) -> bool {
        self.chart.borrow().is_some()
    }

    /// Page-load entry point
    pub async fn start(&self) {
        if self.page.element_exists(&self.settings.embedded_data_id) {
            self.initialize_embedded();
        } else {
            self.initialize().await;
        }
    }

    /// Fetch the dashboard data and render it.
    ///
    /// Runs once; later calls return immediately. Failures end up in the
    /// banner and are never returned.
    pub async fn initialize(&self) {
        if !self.claim_initialization() {
            return;
        }

        info!("Initializing dashboard");

        match self.source.fetch().await {
            Ok(payload) => {
                self.update_stats(&payload);
                self.initialize_chart(&payload.expenses_by_category);
                info!(
                    categories = payload.expenses_by_category.len(),
                    "Dashboard loaded successfully"
                );
            }
            Err(e) if e.is_transport() => {
                warn!(error = %e, "Dashboard backend unreachable");
                self.show_error_message(&e.banner_message());
            }
            Err(e) => {
                error!(error = %e, "Error loading dashboard");
                self.show_error_message(&e.banner_message());
            }
        }
    }

    /// Render the chart from data embedded in the page itself
    pub fn initialize_embedded(&self) {
        if !self.claim_initialization() {
            return;
        }

        let id = &self.settings.embedded_data_id;
        let Some(raw) = self.page.embedded_data(id) else {
            warn!("Embedded data element #{} not found", id);
            return;
        };

        match decode_embedded(&raw) {
            Ok(entries) => {
                info!(categories = entries.len(), "Rendering embedded dashboard data");
                self.render_chart(&entries, Palette::Legacy);
            }
            Err(e) => {
                error!(error = %e, "Invalid embedded dashboard data");
                self.show_error_message(&e.banner_message());
            }
        }
    }

    /// Write the summary figures; missing elements are skipped
    pub fn update_stats(&self, payload: &DashboardPayload) {
        let currency = &self.settings.currency;
        let total = currency.amount(payload.total_expenses);
        let count = payload.category_count.to_string();

        for (selector, text) in [
            (&self.settings.total_selector, &total),
            (&self.settings.count_selector, &count),
            // Mirrors the total until the backend reports a monthly figure
            (&self.settings.month_selector, &total),
        ] {
            if !self.page.set_text(selector, text) {
                debug!("Stat element {} not on page, skipping", selector);
            }
        }
    }

    /// Chart the fetched category totals
    pub fn initialize_chart(&self, entries: &[CategoryTotal]) {
        self.render_chart(entries, Palette::Standard);
    }

    /// Shared chart routine for both initialization paths
    pub fn render_chart(&self, entries: &[CategoryTotal], palette: Palette) {
        let canvas_id = &self.settings.canvas_id;

        if !self.page.element_exists(canvas_id) {
            error!("Chart canvas #{} not found", canvas_id);
            return;
        }

        if !self.charts.is_loaded() {
            error!("Chart library not loaded");
            self.show_error_message(&DashboardError::ChartLibraryMissing.banner_message());
            return;
        }

        self.release_chart();

        if entries.is_empty() {
            self.page.show_empty_state(canvas_id);
            info!("No chart data available");
            return;
        }

        let config = ChartConfig::bar(entries, palette, &self.settings.currency);
        match self.charts.create(canvas_id, &config) {
            Ok(handle) => {
                *self.chart.borrow_mut() = Some(handle);
                info!("Chart created with {} categories", entries.len());
            }
            Err(e) => {
                error!(error = %e, "Failed to create chart");
                self.show_error_message(&e.banner_message());
            }
        }
    }

    /// Show the failure banner.
    ///
    /// Only acts on the dashboard page (the one with the chart canvas). The
    /// banner element is created once and reused afterwards.
    pub fn show_error_message(&self, message: &str) {
        if !self.page.element_exists(&self.settings.canvas_id) {
            return;
        }

        let banner_id = &self.settings.banner_id;
        if !self.page.element_exists(banner_id)
            && !self
                .page
                .insert_banner(banner_id, &self.settings.content_selector)
        {
            warn!(
                "Banner container {} not found, dropping error: {}",
                self.settings.content_selector, message
            );
            return;
        }

        self.page.render_banner(banner_id, message);
    }

    /// Page-unload hook
    pub fn teardown(&self) {
        if self.release_chart() {
            debug!("Chart released on teardown");
        }
    }

    fn claim_initialization(&self) -> bool {
        if self.initialized.replace(true) {
            debug!("Dashboard already initialized, skipping");
            return false;
        }
        true
    }

    fn release_chart(&self) -> bool {
        // Take the handle out before destroying so no borrow is held while
        // the backend runs.
        let previous = self.chart.borrow_mut().take();
        match previous {
            Some(handle) => {
                debug!("Destroying existing chart");
                handle.destroy();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CHART_LIBRARY_MESSAGE, DEFAULT_REJECTION, LOAD_FAILED_MESSAGE};
    use crate::headless::{MemoryPage, RecordingCharts};
    use crate::payload::decode_response;

    /// Source answering every fetch with the same response body
    struct StaticSource {
        body: Result<String, String>,
        calls: Cell<usize>,
    }

    impl StaticSource {
        fn body(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                calls: Cell::new(0),
            }
        }

        fn unreachable() -> Self {
            Self {
                body: Err("connection refused".to_string()),
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl DataSource for StaticSource {
        async fn fetch(&self) -> DashboardResult<DashboardPayload> {
            self.calls.set(self.calls.get() + 1);
            // Give a concurrent caller the chance to run while we are in flight
            tokio::task::yield_now().await;
            match &self.body {
                Ok(body) => decode_response(body),
                Err(e) => Err(DashboardError::Network(e.clone())),
            }
        }
    }

    type TestController = DashboardController<StaticSource, MemoryPage, RecordingCharts>;

    const SAMPLE: &str = r#"{
        "success": true,
        "total_expenses": 1234.5,
        "category_count": 3,
        "expenses_by_category": [["Food", 600.0], ["Rent", 500.0], ["Travel", 134.5]]
    }"#;

    fn controller(source: StaticSource) -> TestController {
        let settings = DashboardSettings::default();
        DashboardController::new(
            source,
            MemoryPage::dashboard(&settings),
            RecordingCharts::new(),
            settings,
        )
    }

    fn totals() -> Vec<CategoryTotal> {
        vec![
            CategoryTotal::new("Food", 600.0),
            CategoryTotal::new("Rent", 500.0),
        ]
    }

    #[tokio::test]
    async fn test_initialize_twice_fetches_once() {
        let controller = controller(StaticSource::body(SAMPLE));

        tokio::join!(controller.initialize(), controller.initialize());
        controller.initialize().await;

        assert_eq!(controller.source.calls.get(), 1);
        assert_eq!(controller.charts().created(), 1);
        assert!(controller.is_initialized());
    }

    #[tokio::test]
    async fn test_successful_load_updates_stats() {
        let controller = controller(StaticSource::body(SAMPLE));
        controller.initialize().await;

        let page = controller.page();
        assert_eq!(page.text(".total-expenses").as_deref(), Some("₹1234.50"));
        assert_eq!(page.text(".this-month").as_deref(), Some("₹1234.50"));
        assert_eq!(page.text(".category-count").as_deref(), Some("3"));
        assert!(page.banner().is_none());
        assert!(controller.has_chart());

        let config = controller.charts().last_config().unwrap();
        assert_eq!(config.data.labels, vec!["Food", "Rent", "Travel"]);
        assert_eq!(config.data.datasets[0].data, vec![600.0, 500.0, 134.5]);
    }

    #[tokio::test]
    async fn test_missing_stat_elements_are_skipped() {
        let settings = DashboardSettings::default();
        let page = MemoryPage::new()
            .with_element(&settings.canvas_id)
            .with_selector(&settings.count_selector);
        let controller = DashboardController::new(
            StaticSource::body(SAMPLE),
            page,
            RecordingCharts::new(),
            settings,
        );

        controller.initialize().await;

        assert_eq!(controller.page().text(".category-count").as_deref(), Some("3"));
        assert!(controller.page().text(".total-expenses").is_none());
        assert!(controller.has_chart());
    }

    #[tokio::test]
    async fn test_empty_categories_show_placeholder() {
        let body = r#"{"success": true, "total_expenses": 0, "category_count": 0, "expenses_by_category": []}"#;
        let controller = controller(StaticSource::body(body));
        controller.initialize().await;

        assert_eq!(controller.charts().created(), 0);
        assert!(!controller.has_chart());
        assert!(controller.page().shows_empty_state());
        assert_eq!(controller.page().text(".total-expenses").as_deref(), Some("₹0.00"));
        assert!(controller.page().banner().is_none());
    }

    #[tokio::test]
    async fn test_rejection_message_reaches_banner() {
        let controller = controller(StaticSource::body(
            r#"{"success": false, "error": "Database unavailable"}"#,
        ));
        controller.initialize().await;

        let banner = controller.page().banner().unwrap();
        assert!(banner.contains("Database unavailable"));
        assert_eq!(controller.charts().created(), 0);
        assert!(controller.page().text(".total-expenses").is_none());
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_default() {
        let controller = controller(StaticSource::body(r#"{"success": false}"#));
        controller.initialize().await;

        assert_eq!(controller.page().banner().as_deref(), Some(DEFAULT_REJECTION));
    }

    #[tokio::test]
    async fn test_network_and_decode_failures_show_generic_banner() {
        let controller = controller(StaticSource::unreachable());
        controller.initialize().await;
        assert_eq!(controller.page().banner().as_deref(), Some(LOAD_FAILED_MESSAGE));

        let controller = controller_with_body(r#"{"success": true, "total_expenses": "n/a"}"#);
        controller.initialize().await;
        assert_eq!(controller.page().banner().as_deref(), Some(LOAD_FAILED_MESSAGE));
    }

    fn controller_with_body(body: &str) -> TestController {
        controller(StaticSource::body(body))
    }

    #[test]
    fn test_reinitializing_chart_destroys_previous_handle() {
        let controller = controller(StaticSource::body(SAMPLE));

        controller.initialize_chart(&totals());
        controller.initialize_chart(&totals());
        controller.initialize_chart(&totals()[..1]);

        let charts = controller.charts();
        assert_eq!(charts.created(), 3);
        assert_eq!(charts.destroyed(), 2);
        assert_eq!(charts.live(), 1);
        assert_eq!(charts.max_live(), 1);
    }

    #[test]
    fn test_empty_data_after_chart_releases_it() {
        let controller = controller(StaticSource::body(SAMPLE));

        controller.initialize_chart(&totals());
        controller.initialize_chart(&[]);

        assert!(!controller.has_chart());
        assert_eq!(controller.charts().live(), 0);
        assert!(controller.page().shows_empty_state());
    }

    #[test]
    fn test_missing_canvas_draws_nothing() {
        let settings = DashboardSettings::default();
        let controller = DashboardController::new(
            StaticSource::body(SAMPLE),
            MemoryPage::new().with_selector(&settings.content_selector),
            RecordingCharts::new(),
            settings,
        );

        controller.initialize_chart(&totals());

        assert_eq!(controller.charts().created(), 0);
        assert!(controller.page().banner().is_none());
    }

    #[test]
    fn test_missing_library_shows_banner() {
        let settings = DashboardSettings::default();
        let controller = DashboardController::new(
            StaticSource::body(SAMPLE),
            MemoryPage::dashboard(&settings),
            RecordingCharts::unavailable(),
            settings,
        );

        controller.initialize_chart(&totals());

        assert_eq!(controller.charts().created(), 0);
        assert_eq!(controller.page().banner().as_deref(), Some(CHART_LIBRARY_MESSAGE));
    }

    #[test]
    fn test_chart_creation_failure_shows_banner() {
        let settings = DashboardSettings::default();
        let controller = DashboardController::new(
            StaticSource::body(SAMPLE),
            MemoryPage::dashboard(&settings),
            RecordingCharts::failing("canvas is already in use"),
            settings,
        );

        controller.initialize_chart(&totals());

        assert!(!controller.has_chart());
        assert_eq!(controller.page().banner().as_deref(), Some(LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn test_banner_is_noop_off_dashboard() {
        let settings = DashboardSettings::default();
        let controller = DashboardController::new(
            StaticSource::body(SAMPLE),
            MemoryPage::new().with_selector(&settings.content_selector),
            RecordingCharts::new(),
            settings,
        );

        controller.show_error_message("Something broke");

        assert_eq!(controller.page().mutations(), 0);
        assert!(controller.page().banner().is_none());
    }

    #[test]
    fn test_banner_is_reused() {
        let controller = controller(StaticSource::body(SAMPLE));

        controller.show_error_message("first");
        controller.show_error_message("second");

        let page = controller.page();
        assert_eq!(page.banner_inserts(), 1);
        assert_eq!(page.banner().as_deref(), Some("second"));
    }

    #[test]
    fn test_banner_without_container_is_dropped() {
        let settings = DashboardSettings::default();
        let controller = DashboardController::new(
            StaticSource::body(SAMPLE),
            MemoryPage::new().with_element(&settings.canvas_id),
            RecordingCharts::new(),
            settings,
        );

        controller.show_error_message("nowhere to go");

        assert!(controller.page().banner().is_none());
    }

    #[tokio::test]
    async fn test_teardown_releases_chart() {
        let controller = controller(StaticSource::body(SAMPLE));

        // Nothing to release yet
        controller.teardown();
        assert_eq!(controller.charts().destroyed(), 0);

        controller.initialize().await;
        controller.teardown();

        assert!(!controller.has_chart());
        assert_eq!(controller.charts().destroyed(), 1);
        assert_eq!(controller.charts().live(), 0);
    }

    #[tokio::test]
    async fn test_start_prefers_embedded_data() {
        let settings = DashboardSettings::default();
        let page = MemoryPage::dashboard(&settings).with_embedded(
            &settings.embedded_data_id,
            r#"[{"category": "Food", "total": 42.5}, {"category": "Bills", "total": 10}]"#,
        );
        let controller = DashboardController::new(
            StaticSource::body(SAMPLE),
            page,
            RecordingCharts::new(),
            settings,
        );

        controller.start().await;
        controller.start().await;

        assert_eq!(controller.source.calls.get(), 0);
        let config = controller.charts().last_config().unwrap();
        assert_eq!(config.data.labels, vec!["Food", "Bills"]);
        assert_eq!(
            config.data.datasets[0].background_color[0],
            Palette::Legacy.swatch(0).fill
        );
        assert_eq!(controller.charts().created(), 1);
        // Legacy templates render no stats
        assert!(controller.page().text(".total-expenses").is_none());
    }

    #[tokio::test]
    async fn test_start_fetches_without_embedded_data() {
        let controller = controller(StaticSource::body(SAMPLE));
        controller.start().await;

        assert_eq!(controller.source.calls.get(), 1);
        let config = controller.charts().last_config().unwrap();
        assert_eq!(
            config.data.datasets[0].background_color[0],
            Palette::Standard.swatch(0).fill
        );
    }

    #[test]
    fn test_invalid_embedded_data_shows_banner() {
        let settings = DashboardSettings::default();
        let page = MemoryPage::dashboard(&settings)
            .with_embedded(&settings.embedded_data_id, "{ not json");
        let controller = DashboardController::new(
            StaticSource::body(SAMPLE),
            page,
            RecordingCharts::new(),
            settings,
        );

        controller.initialize_embedded();

        assert_eq!(controller.page().banner().as_deref(), Some(LOAD_FAILED_MESSAGE));
        assert_eq!(controller.charts().created(), 0);
    }
}
