//! Dataset Summary Module
//! Descriptive statistics for the dataset overview block.

use crate::data::{
    AggregateError, Aggregator, SalesTable, CATEGORY, DISCOUNT, PROFIT, REGION, SALES, SEGMENT,
    SUB_CATEGORY,
};
use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};

/// Headline numbers describing the loaded order table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub total_sales: f64,
    pub total_profit: f64,
    pub mean_sales: f64,
    pub median_sales: f64,
    pub p95_sales: f64,
    pub discount_min: f64,
    pub discount_max: f64,
    /// Fraction of order lines with negative profit.
    pub loss_share: f64,
    /// Unweighted mean of the per-line profit margin.
    pub mean_margin: f64,
    pub categories: usize,
    pub sub_categories: usize,
    pub regions: usize,
    pub segments: usize,
}

impl Default for DatasetSummary {
    fn default() -> Self {
        Self {
            rows: 0,
            total_sales: 0.0,
            total_profit: 0.0,
            mean_sales: f64::NAN,
            median_sales: f64::NAN,
            p95_sales: f64::NAN,
            discount_min: f64::NAN,
            discount_max: f64::NAN,
            loss_share: 0.0,
            mean_margin: f64::NAN,
            categories: 0,
            sub_categories: 0,
            regions: 0,
            segments: 0,
        }
    }
}

impl DatasetSummary {
    pub fn from_table(table: &SalesTable) -> Result<Self, AggregateError> {
        let rows = table.height();
        if rows == 0 {
            return Ok(Self::default());
        }

        let sales = table.float_values(SALES)?;
        let profit = table.float_values(PROFIT)?;
        let discount = table.float_values(DISCOUNT)?;

        let mut sorted = sales.clone();
        sorted.sort_by(f64::total_cmp);

        let losses = profit.iter().filter(|p| **p < 0.0).count();
        let margins = Aggregator::row_margins(table)?;

        Ok(Self {
            rows,
            total_sales: sales.iter().sum(),
            total_profit: profit.iter().sum(),
            mean_sales: sales.iter().mean(),
            median_sales: Data::new(sales).median(),
            p95_sales: sorted_quantile(&sorted, 0.95),
            discount_min: Statistics::min(discount.iter()),
            discount_max: Statistics::max(discount.iter()),
            loss_share: losses as f64 / rows as f64,
            mean_margin: margins.iter().mean(),
            categories: table.unique_values(CATEGORY).len(),
            sub_categories: table.unique_values(SUB_CATEGORY).len(),
            regions: table.unique_values(REGION).len(),
            segments: table.unique_values(SEGMENT).len(),
        })
    }
}

/// Linearly interpolated quantile of ascending `sorted`, `q` in `[0, 1]`.
fn sorted_quantile(sorted: &[f64], q: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return f64::NAN;
    };
    let position = q.clamp(0.0, 1.0) * last as f64;
    let below = position.floor() as usize;
    let above = (below + 1).min(last);
    let weight = position - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * weight
}
