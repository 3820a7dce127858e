//! Budgetboard Dashboard
//!
//! WASM frontend for the server-rendered budget dashboard: loads spending by
//! category, fills in the summary stats and draws the category chart with the
//! page's Chart.js.
//!
//! # Architecture
//!
//! The page markup comes from the server. This crate wires the browser pieces
//! (fetch, DOM, Chart.js, console logging) into the `budgetboard`
//! controller and drives it from the document lifecycle.

use std::rc::Rc;

use budgetboard::DashboardController;
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod api;
mod chartjs;
mod components;
mod config;
mod logging;
mod page;

use api::FetchSource;
use chartjs::ChartJs;
use page::DomPage;

type Controller = DashboardController<FetchSource, DomPage, ChartJs>;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let config = config::UiConfig::load();
    logging::init(config.log_level);

    let Some(page) = DomPage::current() else {
        tracing::error!("No document available, dashboard not started");
        return;
    };

    let source = FetchSource::new(config.settings.endpoint_url(""));
    tracing::debug!("Dashboard data from {}", source.url());

    let controller = Rc::new(Controller::new(source, page, ChartJs, config.settings));

    if let Err(e) = attach_lifecycle(controller) {
        tracing::error!("Failed to attach page lifecycle: {:?}", e);
    }
}

/// Start once the document is parsed; release the chart on unload
fn attach_lifecycle(controller: Rc<Controller>) -> Result<(), JsValue> {
    let window = window();
    let document = document();

    let unload = {
        let controller = Rc::clone(&controller);
        Closure::<dyn Fn()>::new(move || controller.teardown())
    };
    window.add_event_listener_with_callback("beforeunload", unload.as_ref().unchecked_ref())?;
    unload.forget();

    if document.ready_state() == "loading" {
        let ready = Closure::<dyn Fn()>::new(move || launch(Rc::clone(&controller)));
        document
            .add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref())?;
        ready.forget();
    } else {
        launch(controller);
    }

    Ok(())
}

fn launch(controller: Rc<Controller>) {
    spawn_local(async move {
        controller.start().await;
    });
}
