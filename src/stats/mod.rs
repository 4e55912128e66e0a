//! Stats module - Dataset overview statistics

mod summary;

pub use summary::DatasetSummary;
