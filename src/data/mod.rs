//! Data module - CSV loading and aggregation

mod aggregator;
mod loader;

pub use aggregator::{
    AggregateError, Aggregator, CategoryTotal, RegionalTotal, SubCategoryMargin, PROFIT_MARGIN,
    TOTAL_PROFIT, TOTAL_SALES,
};
pub use loader::{
    DataLoader, SalesTable, CATEGORY, DISCOUNT, PROFIT, REGION, SALES, SEGMENT, SUB_CATEGORY,
};

#[cfg(test)]
pub(crate) use loader::tests::sample_table;
