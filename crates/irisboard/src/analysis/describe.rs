//! Summary statistics per numeric column, optionally grouped.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{IrisboardError, Result};
use crate::input::DataTable;
use crate::outlier::Percentiles;

/// Summary statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1).
    pub std: f64,
    pub min: f64,
    /// 25th percentile.
    pub q1: f64,
    pub median: f64,
    /// 75th percentile.
    pub q3: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarize a sample; statistics are `NaN` when they are undefined.
    pub fn from_values(column: impl Into<String>, values: &[f64]) -> Self {
        let column = column.into();
        let count = values.len();

        let Some(percentiles) = Percentiles::new(values.iter().copied()) else {
            return Self {
                column,
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q1: f64::NAN,
                median: f64::NAN,
                q3: f64::NAN,
                max: f64::NAN,
            };
        };

        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };
        let (q1, median, q3) = percentiles.quartiles();

        Self {
            column,
            count,
            mean,
            std,
            min: percentiles.min(),
            q1,
            median,
            q3,
            max: percentiles.max(),
        }
    }
}

/// Summary of one numeric column within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    #[serde(flatten)]
    pub summary: ColumnSummary,
}

/// Summarize every numeric column, in declaration order.
pub fn describe(table: &DataTable) -> Result<Vec<ColumnSummary>> {
    table.validate()?;
    let all_rows: Vec<usize> = (0..table.row_count()).collect();
    Ok(summarize_rows(table, &all_rows))
}

/// Summarize every numeric column per distinct value of `group_column`.
///
/// Groups are ordered lexically; rows with a missing group are skipped.
pub fn describe_by(table: &DataTable, group_column: &str) -> Result<Vec<GroupSummary>> {
    table.validate()?;
    let group_index = table
        .schema
        .position_of(group_column)
        .ok_or_else(|| IrisboardError::ColumnNotFound(group_column.to_string()))?;

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (row, value) in table.column_values(group_index).enumerate() {
        if value.is_missing() {
            continue;
        }
        groups.entry(value.to_string()).or_default().push(row);
    }

    Ok(groups
        .into_iter()
        .flat_map(|(group, rows)| {
            summarize_rows(table, &rows)
                .into_iter()
                .map(move |summary| GroupSummary {
                    group: group.clone(),
                    summary,
                })
        })
        .collect())
}

fn summarize_rows(table: &DataTable, rows: &[usize]) -> Vec<ColumnSummary> {
    table
        .schema
        .columns
        .iter()
        .enumerate()
        .filter(|(_, column)| column.is_numeric())
        .map(|(index, column)| {
            let values: Vec<f64> = rows
                .iter()
                .filter_map(|&row| table.get(row, index).and_then(|v| v.as_f64()))
                .collect();
            ColumnSummary::from_values(column.name.as_str(), &values)
        })
        .collect()
}
