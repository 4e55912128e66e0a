//! Chart Specification Module
//! Declarative, backend-independent description of a chart.

use super::color::{ColorScale, Rgb};
use super::format::ValueFormat;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Scatter,
    Bar,
    HorizontalBar,
    GroupedBar,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Bar => "bar",
            ChartKind::HorizontalBar => "horizontal bar",
            ChartKind::GroupedBar => "grouped bar",
        }
    }
}

/// Ordering of a categorical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOrder {
    /// Order in which categories appear in the data.
    #[default]
    Data,
    /// Smallest summed value first.
    TotalAscending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub field: String,
    pub label: String,
    /// Tick label rotation in degrees.
    pub tick_angle: Option<f64>,
    pub category_order: CategoryOrder,
}

impl Axis {
    pub fn new(field: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            tick_angle: None,
            category_order: CategoryOrder::Data,
        }
    }

    pub fn with_tick_angle(mut self, degrees: f64) -> Self {
        self.tick_angle = Some(degrees);
        self
    }

    pub fn with_category_order(mut self, order: CategoryOrder) -> Self {
        self.category_order = order;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum SeriesData {
    /// `[x, y]` pairs.
    Points(Vec<[f64; 2]>),
    Bars(Vec<BarDatum>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Points(points) => points.len(),
            SeriesData::Bars(bars) => bars.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: SeriesData,
    pub color: Rgb,
}

/// Per-point colour keyed to a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorEncoding {
    pub field: String,
    pub label: String,
    pub scale: ColorScale,
    /// One value per point of the first series.
    pub values: Vec<f64>,
}

impl ColorEncoding {
    /// `(min, max)` of the encoded values; `(0, 0)` when empty.
    pub fn domain(&self) -> (f64, f64) {
        let (min, max) = self
            .values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min.is_infinite() {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }

    pub fn color_for(&self, value: f64) -> Rgb {
        let (min, max) = self.domain();
        let t = if max > min {
            (value - min) / (max - min)
        } else {
            0.5
        };
        self.scale.at(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPosition {
    Auto,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueLabels {
    pub format: ValueFormat,
    pub position: LabelPosition,
}

/// A declarative chart: what to draw, not how.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
    pub color: Option<ColorEncoding>,
    pub value_labels: Option<ValueLabels>,
    /// Marker opacity in `[0, 1]`.
    pub opacity: f32,
    /// Preferred height in pixels.
    pub height: Option<f32>,
}

impl ChartSpec {
    /// Axis carrying the categories, if the chart has one.
    pub fn category_axis(&self) -> Option<&Axis> {
        match self.kind {
            ChartKind::Scatter => None,
            ChartKind::Bar | ChartKind::GroupedBar => Some(&self.x),
            ChartKind::HorizontalBar => Some(&self.y),
        }
    }

    /// Categories in display order (first category drawn first: left or bottom).
    pub fn category_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        let mut totals: Vec<f64> = Vec::new();
        for series in &self.series {
            if let SeriesData::Bars(bars) = &series.data {
                for bar in bars {
                    match labels.iter().position(|l| l == &bar.label) {
                        Some(idx) => totals[idx] += bar.value,
                        None => {
                            labels.push(bar.label.clone());
                            totals.push(bar.value);
                        }
                    }
                }
            }
        }

        let order = self
            .category_axis()
            .map(|axis| axis.category_order)
            .unwrap_or_default();
        if order == CategoryOrder::TotalAscending {
            let mut indexed: Vec<(String, f64)> = labels.into_iter().zip(totals).collect();
            indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            labels = indexed.into_iter().map(|(label, _)| label).collect();
        }
        labels
    }

    /// Bars of one series laid out in display order, with their slot index.
    pub fn ordered_bars<'a>(&self, series: &'a Series) -> Vec<(usize, &'a BarDatum)> {
        let SeriesData::Bars(bars) = &series.data else {
            return Vec::new();
        };
        let labels = self.category_labels();
        let mut placed: Vec<(usize, &BarDatum)> = bars
            .iter()
            .filter_map(|bar| {
                labels
                    .iter()
                    .position(|l| l == &bar.label)
                    .map(|idx| (idx, bar))
            })
            .collect();
        placed.sort_by_key(|(idx, _)| *idx);
        placed
    }

    /// Formatted value label for a bar, if the chart shows them.
    pub fn format_value(&self, value: f64) -> Option<String> {
        self.value_labels.map(|labels| labels.format.format(value))
    }

    /// Number of drawn marks across all series.
    pub fn mark_count(&self) -> usize {
        self.series.iter().map(|s| s.data.len()).sum()
    }
}
