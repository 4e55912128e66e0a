//! Static Chart Renderer
//! Renders a `ChartSpec` to a PNG image with plotters.
//!
//! Layout follows the interactive view: caption on top, axis titles,
//! category ticks for bar charts and value labels where the chart asks for them.

use super::color::Rgb;
use super::spec::{ChartKind, ChartSpec, SeriesData};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Image buffer has the wrong size")]
    Buffer,
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const GRID_GRAY: RGBColor = RGBColor(220, 220, 220);
const LABEL_FONT: (&str, u32) = ("sans-serif", 14);

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// `(min, max)` padded by 5%, always containing zero when `with_zero`.
fn padded_range<I: IntoIterator<Item = f64>>(values: I, with_zero: bool) -> (f64, f64) {
    let (mut min, mut max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min.is_infinite() {
        return (0.0, 1.0);
    }
    if with_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    let pad = ((max - min) * 0.05).max(1e-9);
    (min - pad, max + pad)
}

/// Renders chart specifications to static images.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart to encoded PNG bytes.
    pub fn render_png_bytes(spec: &ChartSpec, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let image = Self::render_image(spec, width, height)?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render a chart into an RGB image buffer.
    pub fn render_image(spec: &ChartSpec, width: u32, height: u32) -> Result<RgbImage, RenderError> {
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            match spec.kind {
                ChartKind::Scatter => Self::draw_scatter(&root, spec)?,
                ChartKind::Bar | ChartKind::GroupedBar => Self::draw_vertical_bars(&root, spec)?,
                ChartKind::HorizontalBar => Self::draw_horizontal_bars(&root, spec)?,
            }
            root.present().map_err(draw_err)?;
        }
        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer)
    }

    fn draw_scatter(root: &Area<'_>, spec: &ChartSpec) -> Result<(), RenderError> {
        let points: Vec<[f64; 2]> = spec
            .series
            .iter()
            .filter_map(|s| match &s.data {
                SeriesData::Points(p) => Some(p.iter().copied()),
                SeriesData::Bars(_) => None,
            })
            .flatten()
            .collect();

        let (x0, x1) = padded_range(points.iter().map(|p| p[0]), false);
        let (y0, y1) = padded_range(points.iter().map(|p| p[1]), false);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .light_line_style(GRID_GRAY)
            .x_desc(spec.x.label.as_str())
            .y_desc(spec.y.label.as_str())
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(draw_err)?;

        let opacity = spec.opacity as f64;
        for series in &spec.series {
            let SeriesData::Points(points) = &series.data else {
                continue;
            };
            let styles: Vec<ShapeStyle> = match &spec.color {
                Some(encoding) => encoding
                    .values
                    .iter()
                    .map(|v| rgb(encoding.color_for(*v)).mix(opacity).filled())
                    .collect(),
                None => vec![rgb(series.color).mix(opacity).filled(); points.len()],
            };
            chart
                .draw_series(
                    points
                        .iter()
                        .zip(styles)
                        .map(|(p, style)| Circle::new((p[0], p[1]), 3, style)),
                )
                .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_vertical_bars(root: &Area<'_>, spec: &ChartSpec) -> Result<(), RenderError> {
        let labels = spec.category_labels();
        let n = labels.len().max(1) as f64;
        let (y0, y1) = padded_range(Self::bar_values(spec), true);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5..n - 0.5, y0..y1)
            .map_err(draw_err)?;

        let tick = |x: &f64| Self::category_tick(&labels, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(GRID_GRAY)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&tick)
            .x_desc(spec.x.label.as_str())
            .y_desc(spec.y.label.as_str())
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(draw_err)?;

        let (width, offsets) = Self::slot_layout(spec.series.len());
        for (series, offset) in spec.series.iter().zip(offsets) {
            let color = rgb(series.color);
            let placed = spec.ordered_bars(series);
            chart
                .draw_series(placed.iter().map(|(slot, bar)| {
                    let x = *slot as f64 + offset;
                    Rectangle::new([(x - width / 2.0, 0.0), (x + width / 2.0, bar.value)], color.filled())
                }))
                .map_err(draw_err)?
                .label(series.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));

            if spec.value_labels.is_some() {
                chart
                    .draw_series(placed.iter().filter_map(|(slot, bar)| {
                        let text = spec.format_value(bar.value)?;
                        let style = TextStyle::from(LABEL_FONT.into_font())
                            .pos(Pos::new(HPos::Center, VPos::Bottom));
                        Some(Text::new(text, (*slot as f64 + offset, bar.value), style))
                    }))
                    .map_err(draw_err)?;
            }
        }

        if spec.series.len() > 1 {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_horizontal_bars(root: &Area<'_>, spec: &ChartSpec) -> Result<(), RenderError> {
        let labels = spec.category_labels();
        let n = labels.len().max(1) as f64;
        let (x0, x1) = padded_range(Self::bar_values(spec), true);
        // Leave room for labels printed beyond the bar ends.
        let span = x1 - x0;
        let (x0, x1) = (x0 - span * 0.1, x1 + span * 0.1);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(140)
            .build_cartesian_2d(x0..x1, -0.5..n - 0.5)
            .map_err(draw_err)?;

        let tick = |y: &f64| Self::category_tick(&labels, *y);
        let value_tick = |x: &f64| spec.format_value(*x).unwrap_or_else(|| format!("{x:.2}"));
        chart
            .configure_mesh()
            .disable_y_mesh()
            .light_line_style(GRID_GRAY)
            .y_labels(labels.len().max(1))
            .y_label_formatter(&tick)
            .x_label_formatter(&value_tick)
            .x_desc(spec.x.label.as_str())
            .y_desc(spec.y.label.as_str())
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(draw_err)?;

        let (width, offsets) = Self::slot_layout(spec.series.len());
        for (series, offset) in spec.series.iter().zip(offsets) {
            let color = rgb(series.color);
            let placed = spec.ordered_bars(series);
            chart
                .draw_series(placed.iter().map(|(slot, bar)| {
                    let y = *slot as f64 + offset;
                    Rectangle::new([(0.0, y - width / 2.0), (bar.value, y + width / 2.0)], color.filled())
                }))
                .map_err(draw_err)?;

            if spec.value_labels.is_some() {
                chart
                    .draw_series(placed.iter().filter_map(|(slot, bar)| {
                        let text = spec.format_value(bar.value)?;
                        let h = if bar.value >= 0.0 { HPos::Left } else { HPos::Right };
                        let style = TextStyle::from(LABEL_FONT.into_font()).pos(Pos::new(h, VPos::Center));
                        Some(Text::new(format!(" {text} "), (bar.value, *slot as f64 + offset), style))
                    }))
                    .map_err(draw_err)?;
            }
        }
        Ok(())
    }

    fn bar_values(spec: &ChartSpec) -> Vec<f64> {
        spec.series
            .iter()
            .filter_map(|s| match &s.data {
                SeriesData::Bars(bars) => Some(bars.iter().map(|b| b.value)),
                SeriesData::Points(_) => None,
            })
            .flatten()
            .collect()
    }

    /// Bar thickness and per-series slot offsets.
    fn slot_layout(series: usize) -> (f64, Vec<f64>) {
        if series <= 1 {
            return (0.7, vec![0.0]);
        }
        let width = 0.8 / series as f64;
        let offsets = (0..series)
            .map(|i| (i as f64 - (series - 1) as f64 / 2.0) * width)
            .collect();
        (width, offsets)
    }

    fn category_tick(labels: &[String], value: f64) -> String {
        if (value - value.round()).abs() > 1e-6 || value < -0.5 {
            return String::new();
        }
        labels.get(value.round() as usize).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartFactory;
    use crate::data::{sample_table, Aggregator};

    #[test]
    fn padded_range_includes_zero_for_bars() {
        let (lo, hi) = padded_range([10.0, 20.0], true);
        assert!(lo < 0.0 && hi > 20.0);
        assert_eq!(padded_range(std::iter::empty::<f64>(), false), (0.0, 1.0));
    }

    #[test]
    fn grouped_slots_are_centered() {
        let (width, offsets) = StaticChartRenderer::slot_layout(2);
        assert!((width - 0.4).abs() < 1e-12);
        assert!((offsets[0] + 0.2).abs() < 1e-12);
        assert!((offsets[1] - 0.2).abs() < 1e-12);
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn renders_category_chart_to_png() {
        let totals = Aggregator::category_totals(&sample_table()).unwrap();
        let spec = ChartFactory::category_sales(&totals);
        let bytes = StaticChartRenderer::render_png_bytes(&spec, 640, 480).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (640, 480));
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn renders_colored_scatter() {
        let spec = ChartFactory::discount_impact(&sample_table()).unwrap();
        let image = StaticChartRenderer::render_image(&spec, 400, 300).unwrap();
        assert_eq!(image.dimensions(), (400, 300));
    }
}
