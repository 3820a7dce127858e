//! Chart.js Backend
//!
//! Bindings to the page's global `Chart` constructor. The declarative part of
//! the configuration crosses the boundary as JSON; the label callbacks are
//! Rust closures that live as long as the chart.

use budgetboard::{
    ChartBackend, ChartConfig, ChartHandle, Currency, DashboardError, DashboardResult,
};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
    /// A Chart.js chart instance
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Chart);
}

type LabelCallback = Closure<dyn Fn(JsValue) -> JsValue>;

/// Chart backend drawing with Chart.js
#[derive(Debug, Default, Clone, Copy)]
pub struct ChartJs;

impl ChartBackend for ChartJs {
    type Handle = ChartJsHandle;

    fn is_loaded(&self) -> bool {
        Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))
            .map(|chart| chart.is_function())
            .unwrap_or(false)
    }

    fn create(&self, canvas_id: &str, config: &ChartConfig) -> DashboardResult<ChartJsHandle> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| DashboardError::Chart(format!("#{} is not a canvas", canvas_id)))?;

        let json = config.to_json()?;
        let js_config = js_sys::JSON::parse(&json).map_err(js_error)?;

        let callbacks = attach_callbacks(&js_config, &config.currency)?;
        let chart = Chart::new(&canvas, &js_config).map_err(js_error)?;

        Ok(ChartJsHandle {
            chart,
            _callbacks: callbacks,
        })
    }
}

/// A live Chart.js chart together with the closures it calls into
pub struct ChartJsHandle {
    chart: Chart,
    _callbacks: Vec<LabelCallback>,
}

impl ChartHandle for ChartJsHandle {
    fn destroy(self) {
        self.chart.destroy();
        // Callbacks drop here, after the chart can no longer call them
    }
}

/// Install the tooltip and value-axis formatters
fn attach_callbacks(config: &JsValue, currency: &Currency) -> DashboardResult<Vec<LabelCallback>> {
    let tooltip_currency = currency.clone();
    let tooltip: LabelCallback = Closure::wrap(Box::new(move |context: JsValue| {
        let label = get_path(&context, &["dataset", "label"])
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        let value = get_path(&context, &["parsed", "y"])
            .and_then(|v| v.as_f64())
            .unwrap_or_default();
        JsValue::from_str(&tooltip_currency.tooltip(&label, value))
    }) as Box<dyn Fn(JsValue) -> JsValue>);

    let tick_currency = currency.clone();
    let tick: LabelCallback = Closure::wrap(Box::new(move |value: JsValue| {
        JsValue::from_str(&tick_currency.tick(value.as_f64().unwrap_or_default()))
    }) as Box<dyn Fn(JsValue) -> JsValue>);

    let tooltip_options = get_path(config, &["options", "plugins", "tooltip"])
        .ok_or_else(|| DashboardError::Chart("missing tooltip options".to_string()))?;
    let callbacks = Object::new();
    set(&callbacks, "label", tooltip.as_ref())?;
    set(&tooltip_options, "callbacks", &callbacks)?;

    let ticks = get_path(config, &["options", "scales", "y", "ticks"])
        .ok_or_else(|| DashboardError::Chart("missing y-axis tick options".to_string()))?;
    set(&ticks, "callback", tick.as_ref())?;

    Ok(vec![tooltip, tick])
}

fn get_path(root: &JsValue, path: &[&str]) -> Option<JsValue> {
    path.iter().try_fold(root.clone(), |node, key| {
        Reflect::get(&node, &JsValue::from_str(key))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    })
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> DashboardResult<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

fn js_error(e: JsValue) -> DashboardError {
    DashboardError::Chart(
        e.as_string()
            .or_else(|| e.dyn_ref::<js_sys::Error>().map(|err| String::from(err.message())))
            .unwrap_or_else(|| format!("{:?}", e)),
    )
}
