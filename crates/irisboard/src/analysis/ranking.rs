//! Row rankings: smallest values and per-species maxima.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::Serialize;

use super::{PETAL_LENGTH, PETAL_WIDTH, SPECIES};
use crate::error::{IrisboardError, Result};
use crate::input::DataTable;

/// The `n` rows with the smallest values of a numeric column, ascending.
///
/// Ties keep their original order; missing values are never selected.
pub fn nsmallest(table: &DataTable, column: &str, n: usize) -> Result<DataTable> {
    let values = table.numeric_values(column)?;

    let mut ranked: Vec<(usize, f64)> = values
        .into_iter()
        .enumerate()
        .filter_map(|(row, value)| value.map(|v| (row, v)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let rows: Vec<usize> = ranked.into_iter().take(n).map(|(row, _)| row).collect();
    Ok(table.select_rows(&rows))
}

/// Row with the largest petal surface for one species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetalAreaLeader {
    pub species: String,
    /// `π × petal_length × petal_width`, rounded to two decimals.
    pub petal_area: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

/// For each species, the first row with the largest petal area, sorted by
/// area descending.
pub fn largest_petal_area(table: &DataTable) -> Result<Vec<PetalAreaLeader>> {
    let lengths = table.numeric_values(PETAL_LENGTH)?;
    let widths = table.numeric_values(PETAL_WIDTH)?;
    let species_index = table
        .schema
        .position_of(SPECIES)
        .ok_or_else(|| IrisboardError::ColumnNotFound(SPECIES.to_string()))?;

    let mut leaders: BTreeMap<String, PetalAreaLeader> = BTreeMap::new();

    for (row, species) in table.column_values(species_index).enumerate() {
        let (Some(length), Some(width)) = (lengths[row], widths[row]) else {
            continue;
        };
        if species.is_missing() {
            continue;
        }

        let area = PI * length * width;
        let species = species.to_string();
        let replace = leaders
            .get(&species)
            .map_or(true, |current| area > current.petal_area);

        if replace {
            leaders.insert(
                species.clone(),
                PetalAreaLeader {
                    species,
                    petal_area: area,
                    petal_length: length,
                    petal_width: width,
                },
            );
        }
    }

    let mut leaders: Vec<PetalAreaLeader> = leaders
        .into_values()
        .map(|mut leader| {
            leader.petal_area = (leader.petal_area * 100.0).round() / 100.0;
            leader
        })
        .collect();
    leaders.sort_by(|a, b| b.petal_area.partial_cmp(&a.petal_area).unwrap_or(Ordering::Equal));

    Ok(leaders)
}
