//! Headless Page and Charts
//!
//! In-memory implementations of the page and charting seams. The CLI preview
//! renders into them, and tests use them to observe what the controller did.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::chart::ChartConfig;
use crate::controller::{ChartBackend, ChartHandle, DashboardPage};
use crate::error::{DashboardError, DashboardResult};
use crate::settings::DashboardSettings;

/// A page modelled as a set of element ids and selector-addressed text nodes
#[derive(Debug, Default)]
pub struct MemoryPage {
    ids: RefCell<BTreeSet<String>>,
    texts: RefCell<BTreeMap<String, Option<String>>>,
    embedded: BTreeMap<String, String>,
    banner: RefCell<Option<Banner>>,
    banner_inserts: Cell<usize>,
    empty_state: Cell<bool>,
    mutations: Cell<usize>,
}

#[derive(Debug, Clone)]
struct Banner {
    id: String,
    message: Option<String>,
}

impl MemoryPage {
    /// A page with no elements at all
    pub fn new() -> Self {
        Self::default()
    }

    /// The full dashboard template: canvas, stat fields and content container
    pub fn dashboard(settings: &DashboardSettings) -> Self {
        Self::new()
            .with_element(&settings.canvas_id)
            .with_selector(&settings.total_selector)
            .with_selector(&settings.count_selector)
            .with_selector(&settings.month_selector)
            .with_selector(&settings.content_selector)
    }

    pub fn with_element(self, id: &str) -> Self {
        self.ids.borrow_mut().insert(id.to_string());
        self
    }

    pub fn with_selector(self, selector: &str) -> Self {
        self.texts.borrow_mut().insert(selector.to_string(), None);
        self
    }

    /// Add an element with id `id` whose text is `raw`
    pub fn with_embedded(mut self, id: &str, raw: &str) -> Self {
        self.embedded.insert(id.to_string(), raw.to_string());
        self.with_element(id)
    }

    /// Text written to the element matching `selector`
    pub fn text(&self, selector: &str) -> Option<String> {
        self.texts.borrow().get(selector).cloned().flatten()
    }

    /// Message currently shown in the banner
    pub fn banner(&self) -> Option<String> {
        self.banner.borrow().as_ref().and_then(|b| b.message.clone())
    }

    /// How many banner elements were created
    pub fn banner_inserts(&self) -> usize {
        self.banner_inserts.get()
    }

    /// Whether the no-data placeholder replaced the chart
    pub fn shows_empty_state(&self) -> bool {
        self.empty_state.get()
    }

    /// Number of writes made to the page
    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    fn mutated(&self) {
        self.mutations.set(self.mutations.get() + 1);
    }
}

impl DashboardPage for MemoryPage {
    fn element_exists(&self, id: &str) -> bool {
        self.ids.borrow().contains(id)
    }

    fn set_text(&self, selector: &str, text: &str) -> bool {
        let mut texts = self.texts.borrow_mut();
        match texts.get_mut(selector) {
            Some(slot) => {
                *slot = Some(text.to_string());
                self.mutated();
                true
            }
            None => false,
        }
    }

    fn show_empty_state(&self, canvas_id: &str) {
        // The placeholder replaces the canvas along with the rest of its container
        self.ids.borrow_mut().remove(canvas_id);
        self.empty_state.set(true);
        self.mutated();
    }

    fn insert_banner(&self, banner_id: &str, container_selector: &str) -> bool {
        if !self.texts.borrow().contains_key(container_selector) {
            return false;
        }

        self.ids.borrow_mut().insert(banner_id.to_string());
        *self.banner.borrow_mut() = Some(Banner {
            id: banner_id.to_string(),
            message: None,
        });
        self.banner_inserts.set(self.banner_inserts.get() + 1);
        self.mutated();
        true
    }

    fn render_banner(&self, banner_id: &str, message: &str) {
        let mut banner = self.banner.borrow_mut();
        if let Some(banner) = banner.as_mut().filter(|b| b.id == banner_id) {
            banner.message = Some(message.to_string());
            self.mutated();
        }
    }

    fn embedded_data(&self, id: &str) -> Option<String> {
        self.embedded.get(id).cloned()
    }
}

/// Counters shared between the backend and the handles it gave out
#[derive(Debug, Default)]
struct ChartLedger {
    created: Cell<usize>,
    destroyed: Cell<usize>,
    live: Cell<usize>,
    max_live: Cell<usize>,
    configs: RefCell<Vec<ChartConfig>>,
}

/// Chart backend that records configurations instead of drawing them
#[derive(Debug, Clone)]
pub struct RecordingCharts {
    loaded: bool,
    failure: Option<String>,
    ledger: Rc<ChartLedger>,
}

impl Default for RecordingCharts {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCharts {
    pub fn new() -> Self {
        Self {
            loaded: true,
            failure: None,
            ledger: Rc::new(ChartLedger::default()),
        }
    }

    /// A backend whose library is missing from the page
    pub fn unavailable() -> Self {
        Self {
            loaded: false,
            ..Self::new()
        }
    }

    /// A backend that rejects every configuration with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::new()
        }
    }

    pub fn created(&self) -> usize {
        self.ledger.created.get()
    }

    pub fn destroyed(&self) -> usize {
        self.ledger.destroyed.get()
    }

    /// Charts created and not yet destroyed
    pub fn live(&self) -> usize {
        self.ledger.live.get()
    }

    /// Highest number of simultaneously live charts seen
    pub fn max_live(&self) -> usize {
        self.ledger.max_live.get()
    }

    pub fn last_config(&self) -> Option<ChartConfig> {
        self.ledger.configs.borrow().last().cloned()
    }
}

impl ChartBackend for RecordingCharts {
    type Handle = RecordedChart;

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn create(&self, _canvas_id: &str, config: &ChartConfig) -> DashboardResult<RecordedChart> {
        if let Some(reason) = &self.failure {
            return Err(DashboardError::Chart(reason.clone()));
        }

        let ledger = &self.ledger;
        ledger.created.set(ledger.created.get() + 1);
        ledger.live.set(ledger.live.get() + 1);
        ledger.max_live.set(ledger.max_live.get().max(ledger.live.get()));
        ledger.configs.borrow_mut().push(config.clone());

        Ok(RecordedChart {
            ledger: Rc::clone(&self.ledger),
        })
    }
}

/// Handle given out by [`RecordingCharts`]
#[derive(Debug)]
pub struct RecordedChart {
    ledger: Rc<ChartLedger>,
}

impl ChartHandle for RecordedChart {
    fn destroy(self) {
        let ledger = &self.ledger;
        ledger.destroyed.set(ledger.destroyed.get() + 1);
        ledger.live.set(ledger.live.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Palette;
    use crate::format::Currency;
    use crate::payload::CategoryTotal;

    #[test]
    fn test_dashboard_page_layout() {
        let settings = DashboardSettings::default();
        let page = MemoryPage::dashboard(&settings);

        assert!(page.element_exists("expenseChart"));
        assert!(page.set_text(".total-expenses", "₹1.00"));
        assert!(!page.set_text(".missing", "x"));
        assert_eq!(page.text(".total-expenses").as_deref(), Some("₹1.00"));
        assert_eq!(page.mutations(), 1);
    }

    #[test]
    fn test_empty_state_removes_canvas() {
        let page = MemoryPage::dashboard(&DashboardSettings::default());
        page.show_empty_state("expenseChart");

        assert!(page.shows_empty_state());
        assert!(!page.element_exists("expenseChart"));
    }

    #[test]
    fn test_recording_ledger() {
        let charts = RecordingCharts::new();
        let config = ChartConfig::bar(
            &[CategoryTotal::new("Food", 1.0)],
            Palette::Standard,
            &Currency::default(),
        );

        let first = charts.create("expenseChart", &config).unwrap();
        let second = charts.create("expenseChart", &config).unwrap();
        assert_eq!(charts.max_live(), 2);

        first.destroy();
        second.destroy();
        assert_eq!(charts.live(), 0);
        assert_eq!(charts.destroyed(), 2);
        assert_eq!(charts.last_config(), Some(config));
    }
}
