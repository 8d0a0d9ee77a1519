//! Row filtering and per-column outlier detection.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::bounds::{IqrBounds, DEFAULT_IQR_MULTIPLIER};
use crate::error::{IrisboardError, Result};
use crate::input::DataTable;

/// How bounds of later columns relate to filtering by earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStrategy {
    /// Columns are processed in declaration order and each column's bounds
    /// are computed on the rows that survived the previous columns.
    #[default]
    Cumulative,
    /// All bounds come from the input table; a row survives if it passes
    /// every column.
    Independent,
}

impl FromStr for FilterStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cumulative" | "sequential" => Ok(FilterStrategy::Cumulative),
            "independent" => Ok(FilterStrategy::Independent),
            _ => Err(format!(
                "Unknown strategy: {}. Use cumulative or independent.",
                s
            )),
        }
    }
}

impl fmt::Display for FilterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStrategy::Cumulative => write!(f, "cumulative"),
            FilterStrategy::Independent => write!(f, "independent"),
        }
    }
}

/// Result of a filtering pass.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Surviving rows, original order, all columns.
    pub table: DataTable,
    /// Bounds applied, one per numeric column that had values.
    pub bounds: Vec<IqrBounds>,
    /// Number of rows dropped.
    pub removed: usize,
}

/// IQR-based outlier filter.
#[derive(Debug, Clone)]
pub struct OutlierFilter {
    multiplier: f64,
    strategy: FilterStrategy,
}

/// Numeric column name with one entry per row (`None` = missing).
type NumericColumn = (String, Vec<Option<f64>>);

impl OutlierFilter {
    /// Create a filter with the 1.5 × IQR rule and cumulative filtering.
    pub fn new() -> Self {
        Self {
            multiplier: DEFAULT_IQR_MULTIPLIER,
            strategy: FilterStrategy::default(),
        }
    }

    /// Set the fence multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the filtering strategy.
    pub fn with_strategy(mut self, strategy: FilterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn strategy(&self) -> FilterStrategy {
        self.strategy
    }

    /// Return a new table without the rows that fall outside the IQR fences
    /// of any numeric column.
    pub fn remove(&self, table: &DataTable) -> Result<DataTable> {
        self.filter(table).map(|outcome| outcome.table)
    }

    /// Like [`remove`](Self::remove), also returning the bounds applied.
    pub fn filter(&self, table: &DataTable) -> Result<FilterOutcome> {
        let columns = self.numeric_columns(table)?;
        let mut keep: Vec<usize> = (0..table.row_count()).collect();

        let applied = match self.strategy {
            FilterStrategy::Cumulative => {
                let mut applied = Vec::with_capacity(columns.len());

                for (name, values) in &columns {
                    let working = keep.iter().filter_map(|&row| values[row]);
                    let Some(bounds) = IqrBounds::from_values(name.as_str(), working, self.multiplier)
                    else {
                        // Every remaining cell is missing, so no row can pass.
                        debug!(column = %name, dropped = keep.len(), "no values in working set");
                        keep.clear();
                        continue;
                    };

                    let before = keep.len();
                    keep.retain(|&row| values[row].is_some_and(|v| bounds.contains(v)));

                    debug!(
                        column = %name,
                        lower = bounds.lower,
                        upper = bounds.upper,
                        dropped = before - keep.len(),
                        "applied IQR bounds"
                    );
                    applied.push(bounds);
                }

                applied
            }
            FilterStrategy::Independent => {
                let all = self.column_bounds(&columns);

                keep.retain(|&row| {
                    columns.iter().zip(&all).all(|((_, values), bounds)| match bounds {
                        Some(bounds) => values[row].is_some_and(|v| bounds.contains(v)),
                        None => false,
                    })
                });

                all.into_iter().flatten().collect()
            }
        };

        let removed = table.row_count() - keep.len();
        info!(
            strategy = %self.strategy,
            rows_in = table.row_count(),
            rows_out = keep.len(),
            removed,
            "removed outliers"
        );

        Ok(FilterOutcome {
            table: table.select_rows(&keep),
            bounds: applied,
            removed,
        })
    }

    /// Per numeric column, the rows of the input outside that column's
    /// bounds, with bounds computed from the whole input.
    ///
    /// Every numeric column gets an entry; missing values are never outliers.
    pub fn detect(&self, table: &DataTable) -> Result<IndexMap<String, DataTable>> {
        let columns = self.numeric_columns(table)?;
        let all = self.column_bounds(&columns);

        let mut outliers = IndexMap::with_capacity(columns.len());
        for ((name, values), bounds) in columns.iter().zip(&all) {
            let rows: Vec<usize> = match bounds {
                Some(bounds) => values
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| value.is_some_and(|v| bounds.is_outlier(v)))
                    .map(|(row, _)| row)
                    .collect(),
                None => Vec::new(),
            };

            debug!(column = %name, outliers = rows.len(), "detected outliers");
            outliers.insert(name.clone(), table.select_rows(&rows));
        }

        Ok(outliers)
    }

    /// Bounds of every numeric column computed from the whole input.
    pub fn bounds(&self, table: &DataTable) -> Result<Vec<IqrBounds>> {
        let columns = self.numeric_columns(table)?;
        Ok(self.column_bounds(&columns).into_iter().flatten().collect())
    }

    fn column_bounds(&self, columns: &[NumericColumn]) -> Vec<Option<IqrBounds>> {
        columns
            .iter()
            .map(|(name, values)| {
                IqrBounds::from_values(name.as_str(), values.iter().flatten().copied(), self.multiplier)
            })
            .collect()
    }

    /// Validate the table and extract its numeric columns in declaration order.
    fn numeric_columns(&self, table: &DataTable) -> Result<Vec<NumericColumn>> {
        if !(self.multiplier.is_finite() && self.multiplier >= 0.0) {
            return Err(IrisboardError::Config(format!(
                "IQR multiplier must be a non-negative number, got {}",
                self.multiplier
            )));
        }

        table.validate()?;

        Ok(table
            .schema
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.is_numeric())
            .map(|(index, column)| {
                let values = table.column_values(index).map(|v| v.as_f64()).collect();
                (column.name.clone(), values)
            })
            .collect())
    }
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self::new()
    }
}
