//! Dashboard configuration
//!
//! The server can adjust the page contract without rebuilding the frontend,
//! either through `<meta>` tags:
//!
//! ```html
//! <meta name="budgetboard:endpoint" content="/api/dashboard-data">
//! <meta name="budgetboard:currency" content="₹">
//! <meta name="budgetboard:log-level" content="debug">
//! ```
//!
//! or through a window object:
//!
//! ```javascript
//! window.__BUDGETBOARD_CONFIG__ = { endpoint: "/api/dashboard-data", currency: "₹" };
//! ```

use budgetboard::DashboardSettings;
use wasm_bindgen::JsCast;

const META_PREFIX: &str = "budgetboard:";
const WINDOW_CONFIG: &str = "__BUDGETBOARD_CONFIG__";

/// Frontend configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub settings: DashboardSettings,
    pub log_level: tracing::Level,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            settings: DashboardSettings::default(),
            log_level: tracing::Level::INFO,
        }
    }
}

impl UiConfig {
    /// Load configuration (meta tags win over the window object)
    pub fn load() -> Self {
        let mut config = Self::default();
        let lookup = |key: &str| {
            get_meta_content(key)
                .or_else(|| get_js_config(key))
                .filter(|value| !value.is_empty())
        };

        if let Some(endpoint) = lookup("endpoint") {
            config.settings.endpoint = endpoint;
        }
        if let Some(symbol) = lookup("currency") {
            config.settings.currency.symbol = symbol;
        }
        if let Some(level) = lookup("log-level").and_then(|l| parse_level(&l)) {
            config.log_level = level;
        }

        config
    }
}

fn parse_level(level: &str) -> Option<tracing::Level> {
    level.trim().parse().ok()
}

/// Get content from a <meta name="budgetboard:..."> tag
fn get_meta_content(key: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}{}\"]", META_PREFIX, key);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content())
}

/// Get a value from window.__BUDGETBOARD_CONFIG__
fn get_js_config(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &WINDOW_CONFIG.into()).ok()?;

    if config.is_undefined() || config.is_null() {
        return None;
    }

    // Window config uses snake_case keys
    let key = key.replace('-', "_");
    js_sys::Reflect::get(&config, &key.into()).ok()?.as_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UiConfig::default();
        assert_eq!(config.settings.endpoint, "/api/dashboard-data");
        assert_eq!(config.log_level, tracing::Level::INFO);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_level(" WARN "), Some(tracing::Level::WARN));
        assert_eq!(parse_level("loud"), None);
    }
}
