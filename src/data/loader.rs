//! CSV Data Loader Module
//! Reads the sales CSV with Polars and validates the required columns.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const SALES: &str = "Sales";
pub const PROFIT: &str = "Profit";
pub const DISCOUNT: &str = "Discount";
pub const CATEGORY: &str = "Category";
pub const SUB_CATEGORY: &str = "Sub-Category";
pub const PRODUCT: &str = "Product";
pub const SEGMENT: &str = "Segment";
pub const REGION: &str = "Region";

/// Columns parsed as floating point.
pub const NUMERIC_COLUMNS: [&str; 3] = [SALES, PROFIT, DISCOUNT];

/// Columns kept as text.
pub const TEXT_COLUMNS: [&str; 5] = [CATEGORY, SUB_CATEGORY, PRODUCT, SEGMENT, REGION];

/// Other headers accepted for the product column, e.g. the Superstore export's.
pub const PRODUCT_ALIASES: [&str; 1] = ["Product Name"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to parse CSV {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
    #[error("Column '{column}' contains a value that is not a number")]
    InvalidNumber { column: String },
    #[error("Column '{column}' has {count} empty value(s)")]
    MissingValue { column: String, count: usize },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Validated, read-only order table.
///
/// Numeric columns are guaranteed `Float64` without nulls, text columns
/// `String` without nulls.
#[derive(Debug, Clone)]
pub struct SalesTable {
    df: DataFrame,
    source: Option<PathBuf>,
}

impl SalesTable {
    /// Validate an in-memory frame and normalise its column types.
    pub fn from_dataframe(mut df: DataFrame) -> Result<Self, LoaderError> {
        if df.column(PRODUCT).is_err() {
            let alias = PRODUCT_ALIASES
                .iter()
                .copied()
                .find(|alias| df.column(alias).is_ok());
            if let Some(alias) = alias {
                debug!(from = alias, to = PRODUCT, "renaming product column");
                df.rename(alias, PRODUCT.into())?;
            }
        }

        for name in NUMERIC_COLUMNS.iter().chain(TEXT_COLUMNS.iter()) {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }

        for name in NUMERIC_COLUMNS {
            let series = df.column(name)?.as_materialized_series().clone();
            let nulls_before = series.null_count();
            let parsed = series
                .strict_cast(&DataType::Float64)
                .map_err(|_| LoaderError::InvalidNumber {
                    column: name.to_string(),
                })?;
            if nulls_before > 0 || parsed.null_count() > 0 {
                return Err(LoaderError::InvalidNumber {
                    column: name.to_string(),
                });
            }
            df.with_column(parsed)?;
        }

        for name in TEXT_COLUMNS {
            let series = df
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::String)?;
            let count = series.null_count();
            if count > 0 {
                return Err(LoaderError::MissingValue {
                    column: name.to_string(),
                    count,
                });
            }
            df.with_column(series)?;
        }

        Ok(Self { df, source: None })
    }

    /// Number of order lines.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Path the table was read from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Get list of column names.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get a numeric column as plain values.
    pub fn float_values(&self, column: &str) -> Result<Vec<f64>, PolarsError> {
        float_column(&self.df, column)
    }

    /// Get sorted unique values from a column.
    pub fn unique_values(&self, column: &str) -> Vec<String> {
        let mut values: Vec<String> = self
            .df
            .column(column)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                (0..series.len())
                    .filter_map(|i| {
                        let val = series.get(i).ok()?;
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        values.sort();
        values
    }

    /// Return a new table with one extra (or replaced) column.
    pub(crate) fn with_derived(&self, df: DataFrame) -> Self {
        Self {
            df,
            source: self.source.clone(),
        }
    }
}

/// Read a `Float64`-castable column out of a frame.
pub(crate) fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, PolarsError> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let values = series
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();
    Ok(values)
}

/// Read a string column out of a frame.
pub(crate) fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, PolarsError> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let values = series
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect();
    Ok(values)
}

/// Loads the order CSV.
pub struct DataLoader;

impl DataLoader {
    /// Load and validate a CSV file using Polars.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<SalesTable, LoaderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "reading CSV");
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_encoding(CsvEncoding::LossyUtf8)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut table = SalesTable::from_dataframe(df)?;
        table.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            rows = table.height(),
            columns = table.column_names().len(),
            "loaded sales table"
        );
        Ok(table)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "Row ID,Category,Sub-Category,Product,Segment,Region,Sales,Profit,Discount";

    /// Small in-memory order table shared by the other test modules.
    pub(crate) fn sample_table() -> SalesTable {
        let df = df!(
            CATEGORY => ["Technology", "Furniture", "Furniture", "Office Supplies", "Technology", "Office Supplies"],
            SUB_CATEGORY => ["Copiers", "Tables", "Chairs", "Paper", "Phones", "Binders"],
            PRODUCT => ["Canon Copier", "Bretford Table", "Hon Chair", "Xerox 1967", "iPhone", "Avery Binder"],
            SEGMENT => ["Corporate", "Consumer", "Consumer", "Home Office", "Consumer", "Corporate"],
            REGION => ["West", "Central", "East", "West", "South", "Central"],
            SALES => [100.0, 200.0, 50.0, 25.0, 300.0, 10.0],
            PROFIT => [20.0, -10.0, 5.0, 12.5, 30.0, -4.0],
            DISCOUNT => [0.0, 0.3, 0.1, 0.0, 0.2, 0.8]
        )
        .expect("fixture frame");
        SalesTable::from_dataframe(df).expect("fixture table")
    }

    fn write_csv(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("orders.csv");
        fs::write(&path, body).expect("write fixture");
        path
    }

    #[test]
    fn loads_typed_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            &format!(
                "{HEADER}\n1,Technology,Phones,\"Phone, black\",Consumer,West,100,20,0\n2,Furniture,Tables,Desk,Corporate,East,50.5,-5.25,0.2\n"
            ),
        );

        let table = DataLoader::load_csv(&path).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.source(), Some(path.as_path()));
        assert_eq!(table.float_values(SALES).unwrap(), vec![100.0, 50.5]);
        assert_eq!(table.float_values(PROFIT).unwrap(), vec![20.0, -5.25]);
        assert_eq!(
            text_column(table.dataframe(), PRODUCT).unwrap(),
            vec!["Phone, black".to_string(), "Desk".to_string()]
        );
        assert_eq!(
            table.dataframe().column(DISCOUNT).unwrap().dtype(),
            &DataType::Float64
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::load_csv(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "Category,Sub-Category,Product,Segment,Sales,Profit,Discount\nTechnology,Phones,Phone,Consumer,1,1,0\n",
        );
        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == REGION));
    }

    #[test]
    fn non_numeric_sales_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            &format!("{HEADER}\n1,Technology,Phones,Phone,Consumer,West,abc,20,0\n"),
        );
        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidNumber { ref column } if column == SALES));
    }

    #[test]
    fn long_row_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            &format!("{HEADER}\n1,Technology,Phones,Phone,Consumer,West,100,20,0,extra,fields\n"),
        );
        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Parse { .. }), "{err}");
    }

    #[test]
    fn short_row_reports_the_empty_column() {
        // Missing trailing fields are read as nulls.
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            &format!(
                "{HEADER}\n1,Technology,Phones,Phone,Consumer,West,100,20,0\n2,Furniture,Tables,Desk,Corporate,East,50,5\n"
            ),
        );
        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidNumber { ref column } if column == DISCOUNT));
    }

    #[test]
    fn loads_superstore_export_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "Row ID,Order ID,Order Date,Ship Date,Ship Mode,Customer ID,Customer Name,Segment,Country,City,State,Postal Code,Region,Product ID,Category,Sub-Category,Product Name,Sales,Quantity,Discount,Profit\n\
             1,CA-2016-152156,11/8/2016,11/11/2016,Second Class,CG-12520,Claire Gute,Consumer,United States,Henderson,Kentucky,42420,South,FUR-BO-10001798,Furniture,Bookcases,Bush Somerset Collection Bookcase,261.96,2,0,41.9136\n\
             2,CA-2016-138688,6/12/2016,6/16/2016,Second Class,DV-13045,Darrin Van Huff,Corporate,United States,Los Angeles,California,90036,West,OFF-LA-10000240,Office Supplies,Labels,\"Self-Adhesive Address Labels for Typewriters, 1/Pkg\",14.62,2,0,6.8714\n",
        );

        let table = DataLoader::load_csv(&path).unwrap();
        assert_eq!(table.height(), 2);
        assert!(table.column_names().contains(&PRODUCT.to_string()));
        assert!(!table.column_names().contains(&"Product Name".to_string()));
        assert_eq!(
            text_column(table.dataframe(), PRODUCT).unwrap(),
            vec![
                "Bush Somerset Collection Bookcase".to_string(),
                "Self-Adhesive Address Labels for Typewriters, 1/Pkg".to_string(),
            ]
        );
        assert_eq!(table.float_values(SALES).unwrap(), vec![261.96, 14.62]);
        assert_eq!(table.unique_values(REGION), vec!["South", "West"]);
    }

    #[test]
    fn product_column_missing_under_every_name() {
        let df = df!(
            CATEGORY => ["Technology"],
            SUB_CATEGORY => ["Phones"],
            "Product ID" => ["TEC-PH-1"],
            SEGMENT => ["Consumer"],
            REGION => ["West"],
            SALES => [1.0],
            PROFIT => [1.0],
            DISCOUNT => [0.0]
        )
        .unwrap();
        let err = SalesTable::from_dataframe(df).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == PRODUCT));
    }

    #[test]
    fn empty_region_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            &format!("{HEADER}\n1,Technology,Phones,Phone,Consumer,,100,20,0\n"),
        );
        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingValue { ref column, count: 1 } if column == REGION));
    }

    #[test]
    fn unique_values_are_sorted() {
        let table = sample_table();
        assert_eq!(
            table.unique_values(REGION),
            vec!["Central", "East", "South", "West"]
        );
    }
}
