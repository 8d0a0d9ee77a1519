//! Irisboard: outlier cleaning and descriptive reporting for tabular flower measurements.
//!
//! The crate covers the two halves of a small reporting service:
//!
//! - **Preparation**: load raw CSV data, drop statistical outliers with the
//!   interquartile-range rule and persist the cleaned table to Parquet.
//! - **Reporting**: compute descriptive statistics and a scatterplot matrix
//!   from the cleaned table and render them as HTML pages.
//!
//! # Example
//!
//! ```no_run
//! use irisboard::{load_table, remove_outliers};
//!
//! let table = load_table("data/iris.csv").unwrap();
//! let cleaned = remove_outliers(&table).unwrap();
//!
//! println!("{} -> {} rows", table.row_count(), cleaned.row_count());
//! ```

pub mod analysis;
pub mod error;
pub mod input;
pub mod outlier;
pub mod report;
pub mod schema;

mod pipeline;

pub use crate::pipeline::{
    DataSource, PrepConfig, PrepReport, Preparation, DEFAULT_DATA_URL, DEFAULT_OUTPUT,
};
pub use error::{IrisboardError, Result};
pub use input::{
    load_table, read_parquet, write_parquet, DataTable, Parser, ParserConfig, SourceMetadata,
};
pub use outlier::{
    detect_outliers, remove_outliers, FilterOutcome, FilterStrategy, IqrBounds, OutlierFilter,
};
pub use report::{Pairplot, ReportRenderer};
pub use schema::{ColumnSchema, ColumnType, TableSchema, Value};
