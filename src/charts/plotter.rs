//! Chart Plotter Module
//! Draws a `ChartSpec` interactively using egui_plot.

use super::color::Rgb;
use super::spec::{ChartKind, ChartSpec, ColorEncoding, LabelPosition, SeriesData};
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, PlotUi, Points, Text};

/// Number of colour buckets used for colour-encoded scatter plots.
const COLOR_BUCKETS: usize = 24;
const DEFAULT_HEIGHT: f32 = 420.0;
const SINGLE_BAR_WIDTH: f64 = 0.7;
const GROUPED_BAR_WIDTH: f64 = 0.38;

pub fn color32(color: Rgb, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.0, color.1, color.2, alpha)
}

/// Category name for an integer grid mark, empty otherwise.
fn category_tick(labels: &[String], value: f64) -> String {
    if (value - value.round()).abs() > 1e-6 || value < -0.5 {
        return String::new();
    }
    labels
        .get(value.round() as usize)
        .cloned()
        .unwrap_or_default()
}

/// Draws chart specifications with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a chart with its title above the plot.
    pub fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec) {
        ui.label(RichText::new(&spec.title).size(16.0).strong());

        let height = spec.height.unwrap_or(DEFAULT_HEIGHT);
        let labels = spec.category_labels();

        let mut plot = Plot::new(format!("chart_{}", spec.id))
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x.label.clone())
            .y_axis_label(spec.y.label.clone());

        if spec.series.len() > 1 {
            plot = plot.legend(Legend::default());
        }

        match spec.kind {
            ChartKind::Bar | ChartKind::GroupedBar => {
                plot = plot
                    .x_axis_formatter(move |mark, _range| category_tick(&labels, mark.value))
                    .include_y(0.0);
            }
            ChartKind::HorizontalBar => {
                plot = plot
                    .y_axis_formatter(move |mark, _range| category_tick(&labels, mark.value))
                    .include_x(0.0);
            }
            ChartKind::Scatter => {}
        }

        plot.show(ui, |plot_ui| match spec.kind {
            ChartKind::Scatter => Self::draw_scatter(plot_ui, spec),
            ChartKind::Bar | ChartKind::HorizontalBar | ChartKind::GroupedBar => {
                Self::draw_bars(plot_ui, spec)
            }
        });

        if let Some(encoding) = &spec.color {
            Self::draw_color_bar(ui, spec, encoding);
        }
    }

    fn draw_scatter(plot_ui: &mut PlotUi, spec: &ChartSpec) {
        for series in &spec.series {
            let SeriesData::Points(points) = &series.data else {
                continue;
            };

            match &spec.color {
                None => {
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(2.5)
                            .color(color32(series.color, spec.opacity))
                            .name(&series.name),
                    );
                }
                Some(encoding) => {
                    // egui_plot colours a whole Points item at once, so bucket by colour.
                    let (min, max) = encoding.domain();
                    let mut buckets: Vec<Vec<[f64; 2]>> = vec![Vec::new(); COLOR_BUCKETS];
                    for (point, value) in points.iter().zip(&encoding.values) {
                        let t = if max > min {
                            (value - min) / (max - min)
                        } else {
                            0.5
                        };
                        let idx = ((t * COLOR_BUCKETS as f64) as usize).min(COLOR_BUCKETS - 1);
                        buckets[idx].push(*point);
                    }

                    for (idx, bucket) in buckets.into_iter().enumerate() {
                        if bucket.is_empty() {
                            continue;
                        }
                        let t = (idx as f64 + 0.5) / COLOR_BUCKETS as f64;
                        plot_ui.points(
                            Points::new(PlotPoints::from_iter(bucket))
                                .radius(2.5)
                                .color(color32(encoding.scale.at(t), spec.opacity)),
                        );
                    }
                }
            }
        }
    }

    fn draw_bars(plot_ui: &mut PlotUi, spec: &ChartSpec) {
        let horizontal = spec.kind == ChartKind::HorizontalBar;
        let count = spec.series.len();
        let width = if count > 1 {
            GROUPED_BAR_WIDTH
        } else {
            SINGLE_BAR_WIDTH
        };

        let outside = spec
            .value_labels
            .map(|l| l.position == LabelPosition::Outside)
            .unwrap_or(false);

        for (series_idx, series) in spec.series.iter().enumerate() {
            let offset = if count > 1 {
                (series_idx as f64 - (count - 1) as f64 / 2.0) * width
            } else {
                0.0
            };
            let fill = color32(series.color, spec.opacity);

            let placed = spec.ordered_bars(series);
            let bars: Vec<Bar> = placed
                .iter()
                .map(|(slot, datum)| {
                    Bar::new(*slot as f64 + offset, datum.value)
                        .width(width)
                        .name(&datum.label)
                        .fill(fill)
                })
                .collect();

            let mut chart = BarChart::new(bars).color(fill).name(&series.name);
            if horizontal {
                chart = chart.horizontal();
            }
            plot_ui.bar_chart(chart);

            for (slot, datum) in &placed {
                let Some(text) = spec.format_value(datum.value) else {
                    continue;
                };
                let argument = *slot as f64 + offset;
                let (position, anchor) = match (horizontal, datum.value >= 0.0) {
                    (true, true) => (PlotPoint::new(datum.value, argument), Align2::LEFT_CENTER),
                    (true, false) => (PlotPoint::new(datum.value, argument), Align2::RIGHT_CENTER),
                    (false, true) => (PlotPoint::new(argument, datum.value), Align2::CENTER_BOTTOM),
                    (false, false) => (PlotPoint::new(argument, datum.value), Align2::CENTER_TOP),
                };
                let label = if outside {
                    format!(" {text} ")
                } else {
                    text
                };
                plot_ui.text(Text::new(position, label).anchor(anchor));
            }
        }
    }

    /// Horizontal gradient legend for colour-encoded charts.
    fn draw_color_bar(
        ui: &mut egui::Ui,
        spec: &ChartSpec,
        encoding: &ColorEncoding,
    ) {
        let (min, max) = encoding.domain();
        ui.horizontal(|ui| {
            ui.label(RichText::new(&encoding.label).size(12.0));
            ui.label(RichText::new(format!("{min:.0}")).size(11.0));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(220.0, 12.0), egui::Sense::hover());
            let steps = 44;
            let step_w = rect.width() / steps as f32;
            for i in 0..steps {
                let t = i as f64 / (steps - 1) as f64;
                let x = rect.left() + i as f32 * step_w;
                let cell = egui::Rect::from_min_size(
                    egui::pos2(x, rect.top()),
                    egui::vec2(step_w + 0.5, rect.height()),
                );
                ui.painter()
                    .rect_filled(cell, 0.0, color32(encoding.scale.at(t), 1.0));
            }
            ui.label(RichText::new(format!("{max:.0}")).size(11.0));
            ui.label(
                RichText::new(format!("({} points)", spec.mark_count()))
                    .size(11.0)
                    .weak(),
            );
        });
    }
}
