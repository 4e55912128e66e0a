//! Chart export: PNG per chart plus a JSON manifest of the specifications.

use crate::charts::{ChartSpec, RenderError, StaticChartRenderer};
use crate::dashboard::Dashboard;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const MANIFEST_FILE: &str = "charts.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File name for the `index`-th chart, e.g. `02_category_sales.png`.
pub fn png_file_name(index: usize, spec: &ChartSpec) -> String {
    format!("{:02}_{}.png", index + 1, spec.id)
}

/// Write every chart specification as pretty JSON.
pub fn write_manifest(dashboard: &Dashboard, dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let specs: Vec<&ChartSpec> = dashboard.charts().collect();
    let path = dir.join(MANIFEST_FILE);
    fs::write(&path, serde_json::to_string_pretty(&specs)?)?;
    Ok(path)
}

/// Render every chart to PNG in `dir` and write the manifest next to them.
pub fn export_charts(
    dashboard: &Dashboard,
    dir: &Path,
    width: u32,
    height: u32,
    mut on_progress: impl FnMut(usize, usize),
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir)?;
    let total = dashboard.charts().count();
    let mut written = Vec::with_capacity(total + 1);

    for (idx, spec) in dashboard.charts().enumerate() {
        let chart_height = spec
            .height
            .map(|h| (h as u32).max(height))
            .unwrap_or(height);
        let bytes = StaticChartRenderer::render_png_bytes(spec, width, chart_height)?;
        let path = dir.join(png_file_name(idx, spec));
        fs::write(&path, bytes)?;
        written.push(path);
        on_progress(idx + 1, total);
    }

    written.push(write_manifest(dashboard, dir)?);
    info!(dir = %dir.display(), files = written.len(), "charts exported");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartFactory;
    use crate::data::{sample_table, Aggregator};

    fn dashboard() -> Dashboard {
        let table = sample_table();
        let mut dashboard = Dashboard::new();
        dashboard.text("# Heading");
        dashboard.chart(ChartFactory::category_sales(
            &Aggregator::category_totals(&table).unwrap(),
        ));
        dashboard.chart(ChartFactory::regional_performance(
            &Aggregator::regional_totals(&table).unwrap(),
        ));
        dashboard
    }

    #[test]
    fn manifest_lists_chart_specs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(&dashboard(), dir.path()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        let charts = json.as_array().unwrap();
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0]["id"], "category_sales");
        assert_eq!(charts[0]["kind"], "bar");
        assert_eq!(charts[1]["kind"], "grouped_bar");
        assert_eq!(charts[0]["value_labels"]["format"]["type"], "si_prefix");
    }

    #[test]
    fn png_names_are_numbered() {
        let d = dashboard();
        let first = d.charts().next().unwrap();
        assert_eq!(png_file_name(0, first), "01_category_sales.png");
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn exports_png_per_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut seen = Vec::new();
        let files = export_charts(&dashboard(), dir.path(), 320, 240, |done, total| {
            seen.push((done, total))
        })
        .unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(seen, vec![(1, 2), (2, 2)]);
        assert!(files.iter().all(|f| f.exists()));
    }
}
