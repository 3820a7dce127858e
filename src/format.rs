//! Currency formatting for stats, tooltips and axis ticks.

use serde::{Deserialize, Serialize};

/// Currency glyph used when nothing is configured
pub const DEFAULT_SYMBOL: &str = "₹";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default = "default_symbol")]
    pub symbol: String,
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
        }
    }
}

impl Currency {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// `amount` prefixed with the glyph, fixed to `decimals` places.
    ///
    /// Ties round away from zero and a zero result never carries a sign.
    pub fn format(&self, amount: f64, decimals: usize) -> String {
        format!("{}{:.*}", self.symbol, decimals, round_half_away(amount, decimals))
    }

    /// Money amount as shown in stats and tooltips (2 places)
    pub fn amount(&self, amount: f64) -> String {
        self.format(amount, 2)
    }

    /// Value-axis tick label (whole units)
    pub fn tick(&self, value: f64) -> String {
        self.format(value, 0)
    }

    /// Tooltip line for a bar: `"<dataset label>: <amount>"`
    pub fn tooltip(&self, dataset_label: &str, value: f64) -> String {
        format!("{}: {}", dataset_label, self.amount(value))
    }

    pub fn dataset_label(&self) -> String {
        format!("Expenses by Category ({})", self.symbol)
    }

    pub fn axis_title(&self) -> String {
        format!("Amount ({})", self.symbol)
    }
}

fn round_half_away(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    // -0.0 == 0.0, so this also drops the sign of a negative zero
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_two_places() {
        let currency = Currency::default();
        assert_eq!(currency.amount(1234.5), "₹1234.50");
        assert_eq!(currency.amount(0.0), "₹0.00");
        assert_eq!(currency.amount(19.999), "₹20.00");
        assert_eq!(currency.amount(1.125), "₹1.13");
        assert_eq!(currency.amount(0.375), "₹0.38");
        assert_eq!(currency.amount(-1.125), "₹-1.13");
        assert_eq!(currency.amount(-0.0), "₹0.00");
        assert_eq!(currency.amount(-0.001), "₹0.00");
    }

    #[test]
    fn test_tick_whole_units() {
        let currency = Currency::new("$");
        assert_eq!(currency.tick(250.0), "$250");
        assert_eq!(currency.tick(1500.4), "$1500");
        assert_eq!(currency.tick(0.5), "$1");
        assert_eq!(currency.tick(2.5), "$3");
        assert_eq!(currency.tick(-0.4), "$0");
    }

    #[test]
    fn test_labels() {
        let currency = Currency::default();
        assert_eq!(currency.dataset_label(), "Expenses by Category (₹)");
        assert_eq!(currency.axis_title(), "Amount (₹)");
        assert_eq!(
            currency.tooltip("Expenses by Category (₹)", 42.0),
            "Expenses by Category (₹): ₹42.00"
        );
    }
}
