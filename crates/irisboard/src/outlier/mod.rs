//! Interquartile-range outlier filtering.
//!
//! Two operations share one bound computation:
//!
//! - [`OutlierFilter::remove`] keeps the rows that lie inside the IQR fences
//!   of every numeric column. With the default [`FilterStrategy::Cumulative`]
//!   each column's fences are computed on the rows that survived the columns
//!   before it, so the result depends on column order.
//! - [`OutlierFilter::detect`] reports, per numeric column, the rows outside
//!   that column's fences computed on the untouched input.

mod bounds;
mod filter;

pub use bounds::{IqrBounds, Percentiles, DEFAULT_IQR_MULTIPLIER};
pub use filter::{FilterOutcome, FilterStrategy, OutlierFilter};

use indexmap::IndexMap;

use crate::error::Result;
use crate::input::DataTable;

/// Remove outliers with the default filter (1.5 × IQR, cumulative).
pub fn remove_outliers(table: &DataTable) -> Result<DataTable> {
    OutlierFilter::new().remove(table)
}

/// Detect per-column outliers with the default filter (1.5 × IQR).
pub fn detect_outliers(table: &DataTable) -> Result<IndexMap<String, DataTable>> {
    OutlierFilter::new().detect(table)
}
