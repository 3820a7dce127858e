//! Chart Configuration
//!
//! Builds the declarative bar-chart configuration handed to the charting
//! library. Rendering itself belongs to the library.

use serde::Serialize;
use serde_json::json;

use crate::format::Currency;
use crate::payload::CategoryTotal;

/// Fill and border colour for one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub fill: &'static str,
    pub border: &'static str,
}

const STANDARD_SWATCHES: [Swatch; 9] = [
    Swatch { fill: "rgba(163, 230, 53, 0.8)", border: "rgb(163, 230, 53)" }, // lime-400
    Swatch { fill: "rgba(34, 197, 94, 0.8)", border: "rgb(34, 197, 94)" },   // green-500
    Swatch { fill: "rgba(59, 130, 246, 0.8)", border: "rgb(59, 130, 246)" }, // blue-500
    Swatch { fill: "rgba(236, 72, 153, 0.8)", border: "rgb(236, 72, 153)" }, // pink-500
    Swatch { fill: "rgba(245, 158, 11, 0.8)", border: "rgb(245, 158, 11)" }, // amber-500
    Swatch { fill: "rgba(139, 92, 246, 0.8)", border: "rgb(139, 92, 246)" }, // violet-500
    Swatch { fill: "rgba(239, 68, 68, 0.8)", border: "rgb(239, 68, 68)" },   // red-500
    Swatch { fill: "rgba(6, 182, 212, 0.8)", border: "rgb(6, 182, 212)" },   // cyan-500
    Swatch { fill: "rgba(168, 85, 247, 0.8)", border: "rgb(168, 85, 247)" }, // purple-500
];

const LEGACY_SWATCHES: [Swatch; 4] = [
    Swatch { fill: "rgba(54, 162, 235, 0.8)", border: "rgb(54, 162, 235)" },
    Swatch { fill: "rgba(255, 99, 132, 0.8)", border: "rgb(255, 99, 132)" },
    Swatch { fill: "rgba(255, 206, 86, 0.8)", border: "rgb(255, 206, 86)" },
    Swatch { fill: "rgba(75, 192, 192, 0.8)", border: "rgb(75, 192, 192)" },
];

/// Colour scheme for the bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Nine colours, used by the fetched dashboard
    #[default]
    Standard,
    /// Four colours, used by templates that embed their data
    Legacy,
}

impl Palette {
    pub fn swatches(&self) -> &'static [Swatch] {
        match self {
            Palette::Standard => &STANDARD_SWATCHES,
            Palette::Legacy => &LEGACY_SWATCHES,
        }
    }

    pub fn len(&self) -> usize {
        self.swatches().len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches().is_empty()
    }

    /// Swatch for the bar at `index`, wrapping around the palette
    pub fn swatch(&self, index: usize) -> Swatch {
        let swatches = self.swatches();
        swatches[index % swatches.len()]
    }
}

/// Chart type understood by the charting library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

/// Complete configuration object for one chart instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: serde_json::Value,
    /// Used by label callbacks, which the backend attaches itself
    #[serde(skip)]
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
    pub border_radius: u32,
    pub border_skipped: bool,
}

/// Split category totals into parallel label/value vectors, keeping order
pub fn project(entries: &[CategoryTotal]) -> (Vec<String>, Vec<f64>) {
    entries
        .iter()
        .map(|entry| (entry.name.clone(), entry.amount))
        .unzip()
}

impl ChartConfig {
    /// Bar chart of `entries`, one bar per category in input order
    pub fn bar(entries: &[CategoryTotal], palette: Palette, currency: &Currency) -> Self {
        let (labels, values) = project(entries);

        let (background_color, border_color): (Vec<String>, Vec<String>) = (0..labels.len())
            .map(|i| {
                let swatch = palette.swatch(i);
                (swatch.fill.to_string(), swatch.border.to_string())
            })
            .unzip();

        let dataset = Dataset {
            label: currency.dataset_label(),
            data: values,
            background_color,
            border_color,
            border_width: 2,
            border_radius: 8,
            border_skipped: false,
        };

        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels,
                datasets: vec![dataset],
            },
            options: bar_options(currency),
            currency: currency.clone(),
        }
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.data.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.labels.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Dark-theme styling shared by every dashboard chart
fn bar_options(currency: &Currency) -> serde_json::Value {
    let axis_title = |text: String| {
        json!({
            "display": true,
            "text": text,
            "color": "#D1D5DB",
            "font": { "size": 14, "weight": "bold" }
        })
    };
    let ticks = json!({ "color": "#9CA3AF", "font": { "size": 12 } });
    let grid = json!({ "color": "rgba(75, 85, 99, 0.3)" });

    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": {
                "labels": { "color": "#D1D5DB", "font": { "size": 14 } }
            },
            "tooltip": {
                "backgroundColor": "rgba(17, 24, 39, 0.9)",
                "titleColor": "#F9FAFB",
                "bodyColor": "#F9FAFB",
                "borderColor": "#4B5563",
                "borderWidth": 1
            }
        },
        "scales": {
            "y": {
                "beginAtZero": true,
                "title": axis_title(currency.axis_title()),
                "ticks": ticks.clone(),
                "grid": grid.clone()
            },
            "x": {
                "title": axis_title("Category".to_string()),
                "ticks": ticks,
                "grid": grid
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(count: usize) -> Vec<CategoryTotal> {
        (0..count)
            .map(|i| CategoryTotal::new(format!("cat-{}", i), (i + 1) as f64 * 10.0))
            .collect()
    }

    #[test]
    fn test_project_preserves_order() {
        let entries = vec![
            CategoryTotal::new("Rent", 900.0),
            CategoryTotal::new("Food", 250.5),
            CategoryTotal::new("Books", 12.0),
        ];
        let (labels, values) = project(&entries);
        assert_eq!(labels, vec!["Rent", "Food", "Books"]);
        assert_eq!(values, vec![900.0, 250.5, 12.0]);
    }

    #[test]
    fn test_bar_has_one_label_and_value_per_category() {
        let config = ChartConfig::bar(&totals(5), Palette::Standard, &Currency::default());
        assert_eq!(config.len(), 5);
        assert_eq!(config.data.datasets.len(), 1);

        let dataset = &config.data.datasets[0];
        assert_eq!(dataset.data.len(), 5);
        assert_eq!(dataset.background_color.len(), 5);
        assert_eq!(dataset.border_width, 2);
        assert_eq!(dataset.label, "Expenses by Category (₹)");
    }

    #[test]
    fn test_colours_cycle_by_index() {
        for palette in [Palette::Standard, Palette::Legacy] {
            let config = ChartConfig::bar(&totals(11), palette, &Currency::default());
            let dataset = &config.data.datasets[0];

            for (i, colour) in dataset.background_color.iter().enumerate() {
                assert_eq!(colour, palette.swatches()[i % palette.len()].fill);
                assert_eq!(dataset.border_color[i], palette.swatches()[i % palette.len()].border);
            }
        }

        assert_eq!(Palette::Standard.len(), 9);
        assert_eq!(Palette::Legacy.len(), 4);
        assert_eq!(Palette::Legacy.swatch(4), Palette::Legacy.swatch(0));
    }

    #[test]
    fn test_serialized_shape() {
        let config = ChartConfig::bar(&totals(2), Palette::Standard, &Currency::new("$"));
        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        assert_eq!(json["type"], "bar");
        assert_eq!(json["data"]["labels"], serde_json::json!(["cat-0", "cat-1"]));
        assert_eq!(json["data"]["datasets"][0]["borderRadius"], 8);
        assert_eq!(json["data"]["datasets"][0]["borderSkipped"], false);
        assert_eq!(json["options"]["scales"]["y"]["title"]["text"], "Amount ($)");
        assert_eq!(json["options"]["scales"]["x"]["title"]["text"], "Category");
        assert!(json.get("currency").is_none());
    }
}
