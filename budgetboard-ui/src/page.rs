//! DOM Page
//!
//! The server-rendered dashboard template, addressed through web-sys.

use std::cell::RefCell;
use std::collections::HashMap;

use budgetboard::DashboardPage;
use leptos::leptos_dom::Mountable;
use leptos::*;
use web_sys::{Document, Element};

use crate::components::{ErrorBanner, NoDataPlaceholder, BANNER_CLASS};

/// The live document
pub struct DomPage {
    document: Document,
    /// The view currently rendered into each container, by container key
    views: RefCell<HashMap<String, View>>,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            views: RefCell::new(HashMap::new()),
        }
    }

    /// The current window's document
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    /// Replace the content of `container` with `view`, dropping whatever
    /// view was rendered there before.
    fn replace_content(&self, key: &str, container: &Element, view: View) {
        container.set_inner_html("");
        if let Err(e) = container.append_child(&view.get_mountable_node()) {
            tracing::error!("Failed to render into {}: {:?}", key, e);
            self.views.borrow_mut().remove(key);
            return;
        }
        self.views.borrow_mut().insert(key.to_string(), view);
    }

    /// Number of views currently held
    pub fn rendered_views(&self) -> usize {
        self.views.borrow().len()
    }
}

impl DashboardPage for DomPage {
    fn element_exists(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn set_text(&self, selector: &str, text: &str) -> bool {
        match self.document.query_selector(selector) {
            Ok(Some(el)) => {
                el.set_text_content(Some(text));
                true
            }
            _ => false,
        }
    }

    fn show_empty_state(&self, canvas_id: &str) {
        let Some(container) = self
            .document
            .get_element_by_id(canvas_id)
            .and_then(|canvas| canvas.parent_element())
        else {
            return;
        };

        let placeholder = view! { <NoDataPlaceholder /> }.into_view();
        self.replace_content(canvas_id, &container, placeholder);
    }

    fn insert_banner(&self, banner_id: &str, container_selector: &str) -> bool {
        let Ok(Some(container)) = self.document.query_selector(container_selector) else {
            return false;
        };
        let Ok(banner) = self.document.create_element("div") else {
            return false;
        };

        banner.set_id(banner_id);
        banner.set_class_name(BANNER_CLASS);
        container
            .insert_before(&banner, container.first_child().as_ref())
            .is_ok()
    }

    fn render_banner(&self, banner_id: &str, message: &str) {
        let Some(banner) = self.document.get_element_by_id(banner_id) else {
            return;
        };

        let body = view! { <ErrorBanner message=message.to_string() /> }.into_view();
        self.replace_content(banner_id, &banner, body);
    }

    fn embedded_data(&self, id: &str) -> Option<String> {
        self.document.get_element_by_id(id)?.text_content()
    }
}
