//! Display surfaces that consume a finished dashboard.

use super::Dashboard;
use crate::charts::{ChartKind, ChartSpec, SeriesData};
use std::io::Write;
use tracing::info;

/// Somewhere a dashboard can be shown.
pub trait DisplaySurface {
    /// Show the whole dashboard. Errors are fatal to the run.
    fn present(&mut self, dashboard: Dashboard) -> anyhow::Result<()>;
}

/// Writes the dashboard as markdown, charts as text tables.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn present(&mut self, dashboard: Dashboard) -> anyhow::Result<()> {
        writeln!(self.out, "{}", dashboard.to_markdown())?;
        self.out.flush()?;
        info!(blocks = dashboard.len(), "dashboard written to terminal");
        Ok(())
    }
}

fn range_of(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}

/// Text rendition of a chart for non-graphical surfaces.
pub fn describe_chart(spec: &ChartSpec) -> String {
    let mut out = format!("**Chart: {}** ({})", spec.title, spec.kind.label());

    match spec.kind {
        ChartKind::Scatter => {
            let points: Vec<[f64; 2]> = spec
                .series
                .iter()
                .filter_map(|s| match &s.data {
                    SeriesData::Points(p) => Some(p.iter().copied()),
                    SeriesData::Bars(_) => None,
                })
                .flatten()
                .collect();
            out.push_str(&format!("\n\n{} points", points.len()));
            if let Some((lo, hi)) = range_of(points.iter().map(|p| p[0])) {
                out.push_str(&format!("; x: {} [{lo:.2} .. {hi:.2}]", spec.x.label));
            }
            if let Some((lo, hi)) = range_of(points.iter().map(|p| p[1])) {
                out.push_str(&format!("; y: {} [{lo:.2} .. {hi:.2}]", spec.y.label));
            }
            if let Some(encoding) = &spec.color {
                let (lo, hi) = encoding.domain();
                out.push_str(&format!(
                    "; colour: {} [{lo:.2} .. {hi:.2}], red low / blue high",
                    encoding.label
                ));
            }
        }
        ChartKind::Bar | ChartKind::HorizontalBar | ChartKind::GroupedBar => {
            let category = spec
                .category_axis()
                .map(|a| a.label.as_str())
                .unwrap_or_default();
            let names: Vec<&str> = spec.series.iter().map(|s| s.name.as_str()).collect();
            out.push_str(&format!("\n\n| {} | {} |", category, names.join(" | ")));
            out.push_str(&format!("\n|---|{}", "---|".repeat(names.len())));

            // Table rows follow the on-screen order, top row first.
            let mut labels = spec.category_labels();
            if spec.kind == ChartKind::HorizontalBar {
                labels.reverse();
            }
            for label in labels {
                let cells: Vec<String> = spec
                    .series
                    .iter()
                    .map(|series| {
                        spec.ordered_bars(series)
                            .into_iter()
                            .find(|(_, bar)| bar.label == label)
                            .map(|(_, bar)| {
                                spec.format_value(bar.value)
                                    .unwrap_or_else(|| format!("{:.2}", bar.value))
                            })
                            .unwrap_or_default()
                    })
                    .collect();
                out.push_str(&format!("\n| {} | {} |", label, cells.join(" | ")));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartFactory;
    use crate::data::{RegionalTotal, SubCategoryMargin};

    #[test]
    fn grouped_bar_becomes_table() {
        let spec = ChartFactory::regional_performance(&[
            RegionalTotal {
                region: "East".into(),
                total_sales: 678_781.24,
                total_profit: 91_522.78,
            },
            RegionalTotal {
                region: "West".into(),
                total_sales: 725_457.82,
                total_profit: 108_418.45,
            },
        ]);
        let text = describe_chart(&spec);
        assert!(text.starts_with("**Chart: Sales vs Profit by Region** (grouped bar)"));
        assert!(text.contains("| Region | Total Sales | Total Profit |"));
        assert!(text.contains("| East | 680k | 92k |"));
        assert!(text.contains("| West | 730k | 110k |"));
    }

    #[test]
    fn horizontal_table_lists_largest_first() {
        let spec = ChartFactory::subcategory_margin(&[
            SubCategoryMargin {
                sub_category: "Copiers".into(),
                margin: 0.3172,
            },
            SubCategoryMargin {
                sub_category: "Tables".into(),
                margin: -0.0556,
            },
        ]);
        let text = describe_chart(&spec);
        let copiers = text.find("| Copiers | 31.72% |").unwrap();
        let tables = text.find("| Tables | -5.56% |").unwrap();
        assert!(copiers < tables);
    }

    #[test]
    fn terminal_surface_writes_markdown() {
        let mut dashboard = Dashboard::new();
        dashboard.text("# Title");
        dashboard.text("body");
        let mut buffer = Vec::new();
        TerminalSurface::new(&mut buffer).present(dashboard).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        assert_eq!(written, "# Title\n\nbody\n");
    }
}
