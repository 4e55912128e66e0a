//! Aggregator Module
//! Grouped summaries of the order table: category totals, sub-category
//! margins and regional performance.

use super::loader::{
    float_column, text_column, SalesTable, CATEGORY, PROFIT, REGION, SALES, SUB_CATEGORY,
};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Derived per-row column.
pub const PROFIT_MARGIN: &str = "Profit Margin";
pub const TOTAL_SALES: &str = "Total Sales";
pub const TOTAL_PROFIT: &str = "Total Profit";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryMargin {
    pub sub_category: String,
    pub margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalTotal {
    pub region: String,
    pub total_sales: f64,
    pub total_profit: f64,
}

/// Profit / Sales, with rows of zero sales mapped to a margin of 0.
pub fn profit_margin_expr() -> Expr {
    when(col(SALES).eq(lit(0.0)))
        .then(lit(0.0))
        .otherwise(col(PROFIT) / col(SALES))
        .alias(PROFIT_MARGIN)
}

/// Pure transforms from the full order table to derived tables.
pub struct Aggregator;

impl Aggregator {
    /// Total Sales per Category, ordered by category name.
    pub fn category_totals(table: &SalesTable) -> Result<Vec<CategoryTotal>, AggregateError> {
        let df = table
            .dataframe()
            .clone()
            .lazy()
            .group_by([col(CATEGORY)])
            .agg([col(SALES).sum()])
            .sort([CATEGORY], SortMultipleOptions::default())
            .collect()?;

        let categories = text_column(&df, CATEGORY)?;
        let sales = float_column(&df, SALES)?;
        Ok(categories
            .into_iter()
            .zip(sales)
            .map(|(category, sales)| CategoryTotal { category, sales })
            .collect())
    }

    /// Copy of the table with the `Profit Margin` column added.
    pub fn with_profit_margin(table: &SalesTable) -> Result<SalesTable, AggregateError> {
        let df = table
            .dataframe()
            .clone()
            .lazy()
            .with_column(profit_margin_expr())
            .collect()?;
        Ok(table.with_derived(df))
    }

    /// Per-row profit margin, in table order.
    pub fn row_margins(table: &SalesTable) -> Result<Vec<f64>, AggregateError> {
        let with_margin = Self::with_profit_margin(table)?;
        Ok(with_margin.float_values(PROFIT_MARGIN)?)
    }

    /// Mean profit margin per Sub-Category, highest margin first.
    pub fn subcategory_margins(
        table: &SalesTable,
    ) -> Result<Vec<SubCategoryMargin>, AggregateError> {
        let df = table
            .dataframe()
            .clone()
            .lazy()
            .with_column(profit_margin_expr())
            .group_by([col(SUB_CATEGORY)])
            .agg([col(PROFIT_MARGIN).mean()])
            .sort(
                [PROFIT_MARGIN, SUB_CATEGORY],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .collect()?;

        let names = text_column(&df, SUB_CATEGORY)?;
        let margins = float_column(&df, PROFIT_MARGIN)?;
        Ok(names
            .into_iter()
            .zip(margins)
            .map(|(sub_category, margin)| SubCategoryMargin {
                sub_category,
                margin,
            })
            .collect())
    }

    /// Total Sales and Total Profit per Region, ordered by region name.
    pub fn regional_totals(table: &SalesTable) -> Result<Vec<RegionalTotal>, AggregateError> {
        let df = table
            .dataframe()
            .clone()
            .lazy()
            .group_by([col(REGION)])
            .agg([
                col(SALES).sum().alias(TOTAL_SALES),
                col(PROFIT).sum().alias(TOTAL_PROFIT),
            ])
            .sort([REGION], SortMultipleOptions::default())
            .collect()?;

        let regions = text_column(&df, REGION)?;
        let sales = float_column(&df, TOTAL_SALES)?;
        let profit = float_column(&df, TOTAL_PROFIT)?;
        Ok(regions
            .into_iter()
            .zip(sales.into_iter().zip(profit))
            .map(|(region, (total_sales, total_profit))| RegionalTotal {
                region,
                total_sales,
                total_profit,
            })
            .collect())
    }
}
