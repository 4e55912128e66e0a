//! Loader → Aggregator → Chart Factory → Dashboard, run once, straight through.

use crate::charts::ChartFactory;
use crate::dashboard::{self, ChartSet, Dashboard};
use crate::data::{Aggregator, DataLoader, SalesTable};
use crate::stats::DatasetSummary;
use anyhow::Context;
use std::path::Path;
use tracing::info;

/// Read the CSV at `path` and build the full dashboard.
pub fn build_dashboard(path: &Path) -> anyhow::Result<Dashboard> {
    let table = DataLoader::load_csv(path)
        .with_context(|| format!("load stage: reading {}", path.display()))?;
    build_from_table(&table)
}

/// Build the dashboard from an already loaded table.
pub fn build_from_table(table: &SalesTable) -> anyhow::Result<Dashboard> {
    let category_totals =
        Aggregator::category_totals(table).context("aggregate stage: category totals")?;
    let margins =
        Aggregator::subcategory_margins(table).context("aggregate stage: sub-category margins")?;
    let regions = Aggregator::regional_totals(table).context("aggregate stage: regional totals")?;
    let summary = DatasetSummary::from_table(table).context("aggregate stage: dataset summary")?;
    info!(
        categories = category_totals.len(),
        sub_categories = margins.len(),
        regions = regions.len(),
        "aggregates computed"
    );

    let charts = ChartSet {
        sales_vs_profit: ChartFactory::sales_vs_profit(table)
            .context("chart stage: sales vs profit")?,
        category_sales: ChartFactory::category_sales(&category_totals),
        subcategory_margin: ChartFactory::subcategory_margin(&margins),
        discount_impact: ChartFactory::discount_impact(table)
            .context("chart stage: discount impact")?,
        regional_performance: ChartFactory::regional_performance(&regions),
    };

    let source = table
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "memory".to_string());
    let dashboard = dashboard::compose(&summary, &source, charts);
    info!(
        blocks = dashboard.len(),
        charts = dashboard.charts().count(),
        "dashboard composed"
    );
    Ok(dashboard)
}
